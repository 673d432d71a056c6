//! Integration tests for map generation: layout scenarios, connectivity and
//! how challenge content scales with difficulty.

use math_maze::{
    calculate_answer, find_open_path, generate_tile_map, generate_tile_map_with, DifficultyLevel,
    GenerationConfig, MathMazeError, MathMazeResult, Position, TileMap, TileType,
};

fn seeded(width: usize, height: usize, difficulty: DifficultyLevel, seed: u64) -> MathMazeResult<TileMap> {
    generate_tile_map_with("it", width, height, difficulty, &GenerationConfig::seeded(seed))
}

/// Test the smallest practical map: fixed start and boss corners, a path
/// between them, and only the boss tile carrying a challenge.
#[test]
fn test_four_by_four_infant_map() -> MathMazeResult<()> {
    let map = seeded(4, 4, DifficultyLevel::Infant, 12345)?;

    assert_eq!(map.width, 4);
    assert_eq!(map.height, 4);
    assert_eq!(map.start_position, Position::new(0, 3));
    assert_eq!(map.boss_position, Position::new(3, 0));
    assert!(map.is_accessible(map.start_position));
    assert!(map.is_accessible(map.boss_position));

    let path = find_open_path(map.start_position, map.boss_position, map.width, map.height, |pos| {
        map.is_accessible(pos)
    });
    assert!(path.is_some(), "boss must be reachable from start");

    let boss_tiles = map
        .tiles
        .iter()
        .flatten()
        .filter(|tile| tile.tile_type == TileType::Boss)
        .count();
    assert_eq!(boss_tiles, 1);
    assert!(!map.is_completed);

    Ok(())
}

/// Test that every difficulty tier produces a connected map at its own size.
#[test]
fn test_every_tier_connected() -> MathMazeResult<()> {
    for (i, difficulty) in DifficultyLevel::ALL.iter().copied().enumerate() {
        let size = difficulty.profile().map_size;
        for seed in 0..10u64 {
            let map = seeded(size, size, difficulty, seed * 31 + i as u64)?;
            assert_eq!(map.tiles.len(), size);
            assert!(map.tiles.iter().all(|row| row.len() == size));

            let path = find_open_path(map.start_position, map.boss_position, size, size, |pos| {
                map.is_accessible(pos)
            })
            .ok_or_else(|| MathMazeError::GenerationFailed(format!("{} seed {} not connected", difficulty, seed)))?;
            assert_eq!(path.first(), Some(&map.start_position));
            assert_eq!(path.last(), Some(&map.boss_position));
        }
    }
    Ok(())
}

/// Test that tiles report their own coordinates and walls are never walkable.
#[test]
fn test_tile_integrity() -> MathMazeResult<()> {
    let map = seeded(17, 13, DifficultyLevel::Medium, 777)?;

    for (y, row) in map.tiles.iter().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            assert_eq!(tile.position, Position::new(x, y));
            if tile.tile_type == TileType::Blocked {
                assert!(!tile.is_accessible);
            }
            if tile.tile_type != TileType::Boss {
                assert!(tile.challenge.is_none());
            }
        }
    }
    Ok(())
}

/// Test that every challenge on a map is internally consistent.
#[test]
fn test_challenge_answers_consistent() -> MathMazeResult<()> {
    for difficulty in DifficultyLevel::ALL {
        let map = seeded(20, 20, difficulty, 4242)?;
        for mob in &map.mobs {
            let challenge = &mob.challenge;
            assert_eq!(challenge.difficulty, difficulty);
            assert_eq!(calculate_answer(challenge.operation, challenge.operands)?, challenge.correct_answer);
            assert!(difficulty
                .profile()
                .allowed_operations
                .contains(&challenge.operation));
        }
    }
    Ok(())
}

/// Test that the boss outranks the map's regular challenges.
#[test]
fn test_boss_challenge_superiority() -> MathMazeResult<()> {
    for difficulty in DifficultyLevel::ALL {
        let map = seeded(14, 14, difficulty, 99)?;
        let boss = map
            .boss_challenge()
            .ok_or_else(|| MathMazeError::InvalidState("missing boss challenge".to_string()))?;

        assert_eq!(boss.difficulty, difficulty.next());
        assert!(boss.reward > difficulty.profile().reward());
        for mob in &map.mobs {
            assert!(boss.reward > mob.challenge.reward);
        }
    }
    Ok(())
}

/// Test that harder tiers place more mobs on average.
#[test]
fn test_mob_density_scales_with_difficulty() -> MathMazeResult<()> {
    let trials = 30u64;
    let mut infant_total = 0usize;
    let mut expert_total = 0usize;

    for seed in 0..trials {
        infant_total += seeded(16, 16, DifficultyLevel::Infant, seed)?.mobs.len();
        expert_total += seeded(16, 16, DifficultyLevel::Expert, seed)?.mobs.len();
    }

    assert!(
        expert_total > infant_total,
        "expert placed {} mobs, infant placed {}",
        expert_total,
        infant_total
    );
    Ok(())
}

/// Test that mobs never start on the start or boss tile, or on a wall.
#[test]
fn test_mob_placement() -> MathMazeResult<()> {
    let map = seeded(24, 24, DifficultyLevel::Expert, 2024)?;
    assert!(!map.mobs.is_empty());

    for mob in &map.mobs {
        assert_ne!(mob.position, map.start_position);
        assert_ne!(mob.position, map.boss_position);
        assert!(map.is_accessible(mob.position));
        assert!(!mob.is_completed);
    }
    Ok(())
}

/// Test that seeded generation is reproducible and entropy generation works.
#[test]
fn test_seeded_reproducibility() -> MathMazeResult<()> {
    let a = seeded(12, 12, DifficultyLevel::Easy, 31337)?;
    let b = seeded(12, 12, DifficultyLevel::Easy, 31337)?;
    assert_eq!(a, b);

    let c = seeded(12, 12, DifficultyLevel::Easy, 31338)?;
    assert_ne!(a.tiles, c.tiles);

    let random = generate_tile_map("random", 12, 12, DifficultyLevel::Easy)?;
    assert_eq!(random.id, "random");
    Ok(())
}

/// Test degenerate dimensions.
#[test]
fn test_degenerate_dimensions() -> MathMazeResult<()> {
    assert!(matches!(
        seeded(0, 5, DifficultyLevel::Infant, 1),
        Err(MathMazeError::InvalidDimensions { width: 0, height: 5 })
    ));

    let single = seeded(1, 1, DifficultyLevel::Infant, 1)?;
    assert_eq!(single.start_position, single.boss_position);
    assert!(single.mobs.is_empty());

    let strip = seeded(6, 1, DifficultyLevel::Toddler, 1)?;
    assert!(strip.tiles[0].iter().all(|tile| tile.is_accessible));
    Ok(())
}

/// Test that the carved maze, not a straight staircase, links start and boss
/// on the even sizes every tier uses.
#[test]
fn test_even_maps_wind_between_corners() -> MathMazeResult<()> {
    for size in (12..=24).step_by(2) {
        let mut shortest = 0;
        for seed in 0..10u64 {
            let config = GenerationConfig::for_testing(seed);
            let map = generate_tile_map_with("even", size, size, DifficultyLevel::Medium, &config)?;
            let path = find_open_path(map.start_position, map.boss_position, size, size, |pos| {
                map.is_accessible(pos)
            })
            .ok_or_else(|| MathMazeError::GenerationFailed(format!("{}x{} not connected", size, size)))?;

            if path.len() - 1 == map.start_position.manhattan_distance(map.boss_position) {
                shortest += 1;
            }
        }
        assert!(
            shortest <= 2,
            "{} of 10 {}x{} maps had a Manhattan-length path",
            shortest,
            size,
            size
        );
    }
    Ok(())
}

/// Test that configs which break generation are rejected up front.
#[test]
fn test_invalid_configs_are_rejected() -> MathMazeResult<()> {
    let weak_boss = GenerationConfig::from_json(r#"{ "seed": 1, "boss_reward_factor": 1 }"#);
    assert!(matches!(weak_boss, Err(MathMazeError::InvalidState(_))));

    let huge_ratio = GenerationConfig {
        extra_opening_ratio: 1e12,
        ..GenerationConfig::seeded(1)
    };
    assert!(matches!(
        generate_tile_map_with("bad", 12, 12, DifficultyLevel::Infant, &huge_ratio),
        Err(MathMazeError::InvalidState(_))
    ));

    let overflowing = GenerationConfig::from_json(r#"{ "seed": 1, "boss_reward_factor": 4294967295 }"#)?;
    assert!(matches!(
        generate_tile_map_with("bad", 12, 12, DifficultyLevel::Infant, &overflowing),
        Err(MathMazeError::GenerationFailed(_))
    ));
    Ok(())
}
