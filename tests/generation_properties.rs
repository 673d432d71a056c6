//! Property tests for map generation over arbitrary sizes, tiers and seeds.

use math_maze::{
    calculate_answer, generate_tile_map_with, is_connected, DifficultyLevel, GenerationConfig,
    Operation, TileType,
};
use proptest::prelude::*;

fn difficulty_strategy() -> impl Strategy<Value = DifficultyLevel> {
    (0..DifficultyLevel::ALL.len()).prop_map(|index| DifficultyLevel::ALL[index])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_maps_are_connected(
        width in 1usize..=24,
        height in 1usize..=24,
        difficulty in difficulty_strategy(),
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::seeded(seed);
        let map = generate_tile_map_with("prop", width, height, difficulty, &config).unwrap();

        prop_assert_eq!(map.tiles.len(), height);
        prop_assert!(map.tiles.iter().all(|row| row.len() == width));
        prop_assert!(map.is_accessible(map.start_position));
        prop_assert!(map.is_accessible(map.boss_position));
        let connected = is_connected(map.start_position, map.boss_position, width, height, |pos| {
            map.is_accessible(pos)
        });
        prop_assert!(connected);
    }

    #[test]
    fn generated_tiles_are_consistent(
        width in 1usize..=24,
        height in 1usize..=24,
        difficulty in difficulty_strategy(),
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::seeded(seed);
        let map = generate_tile_map_with("prop", width, height, difficulty, &config).unwrap();

        let mut boss_tiles = 0;
        for tile in map.tiles.iter().flatten() {
            if tile.tile_type == TileType::Blocked {
                prop_assert!(!tile.is_accessible);
            }
            if tile.tile_type == TileType::Boss {
                boss_tiles += 1;
                prop_assert_eq!(tile.position, map.boss_position);
            } else {
                prop_assert!(tile.challenge.is_none());
            }
        }
        prop_assert_eq!(boss_tiles, 1);

        for mob in &map.mobs {
            prop_assert!(map.is_accessible(mob.position));
            prop_assert_ne!(mob.position, map.start_position);
            prop_assert_ne!(mob.position, map.boss_position);
        }
    }

    #[test]
    fn challenges_are_solvable(
        difficulty in difficulty_strategy(),
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::seeded(seed);
        let size = difficulty.profile().map_size;
        let map = generate_tile_map_with("prop", size, size, difficulty, &config).unwrap();

        let boss = map.boss_challenge().cloned();
        prop_assert!(boss.is_some());

        let challenges = map.mobs.iter().map(|mob| mob.challenge.clone()).chain(boss);
        for challenge in challenges {
            let expected = calculate_answer(challenge.operation, challenge.operands).unwrap();
            prop_assert_eq!(expected, challenge.correct_answer);
            prop_assert!(challenge.is_correct(expected));

            if challenge.operation == Operation::Division {
                prop_assert!(challenge.operands[1] > 0);
                prop_assert_eq!(challenge.operands[0] % challenge.operands[1], 0);
            }
        }
    }
}
