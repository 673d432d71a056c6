//! # Map Assembly
//!
//! Turns a carved maze into a complete [`TileMap`]: tile metadata, the boss
//! challenge at the far corner and mobs scattered over the open cells at a
//! density derived from the map's difficulty.

use crate::generation::utils;
use crate::utils::{find_open_path, reachable_from};
use crate::{
    generate_boss_challenge, generate_challenge, new_entity_id, DifficultyLevel,
    GenerationConfig, Generator, MathMazeError, MathMazeResult, MazeCarver, MazeGrid, Mob,
    Position, Tile, TileMap, TileType,
};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Map generator for a single map transition.
///
/// The start is fixed at the bottom-left corner and the boss at the top-right
/// corner, the pair of cells with the largest Manhattan separation.
#[derive(Debug, Clone)]
pub struct MapAssembler {
    pub id: String,
    pub width: usize,
    pub height: usize,
    pub difficulty: DifficultyLevel,
}

impl MapAssembler {
    /// Creates a new map assembler.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::{DifficultyLevel, MapAssembler, Position};
    ///
    /// let assembler = MapAssembler::new("m1", 4, 4, DifficultyLevel::Infant);
    /// assert_eq!(assembler.start_position(), Position::new(0, 3));
    /// assert_eq!(assembler.boss_position(), Position::new(3, 0));
    /// ```
    pub fn new(id: impl Into<String>, width: usize, height: usize, difficulty: DifficultyLevel) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            difficulty,
        }
    }

    /// Bottom-left corner, where the player enters the map.
    pub fn start_position(&self) -> Position {
        Position::new(0, self.height.saturating_sub(1))
    }

    /// Top-right corner, where the boss waits.
    pub fn boss_position(&self) -> Position {
        Position::new(self.width.saturating_sub(1), 0)
    }

    /// Converts the carved grid into tiles.
    fn build_tiles(&self, grid: &MazeGrid) -> Vec<Vec<Tile>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if grid.is_open(pos) {
                            Tile::empty(pos)
                        } else {
                            Tile::blocked(pos)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Scatters mobs over shuffled open cells reachable from the start, never on
    /// the start or boss cell.
    fn place_mobs(
        &self,
        grid: &MazeGrid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> MathMazeResult<Vec<Mob>> {
        let start = self.start_position();
        let boss = self.boss_position();

        let target = (grid.open_count() as f64 * self.difficulty.profile().density).floor() as usize;

        // Extra openings can leave isolated cells; mobs only go where the player can.
        let reachable = reachable_from(start, self.width, self.height, |pos| grid.is_open(pos));
        let mut candidates: Vec<Position> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|pos| reachable.contains(pos) && *pos != start && *pos != boss)
            .collect();
        candidates.shuffle(rng);
        candidates.truncate(target);

        candidates
            .into_iter()
            .map(|position| -> MathMazeResult<Mob> {
                Ok(Mob {
                    id: new_entity_id(rng),
                    position,
                    challenge: generate_challenge(self.difficulty, config, rng)?,
                    sprite_variant: rng.gen_range(0..config.sprite_variants.max(1)),
                    is_completed: false,
                })
            })
            .collect()
    }
}

impl Generator<TileMap> for MapAssembler {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MathMazeResult<TileMap> {
        if self.width == 0 || self.height == 0 {
            return Err(MathMazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let start = self.start_position();
        let boss = self.boss_position();

        let grid = MazeCarver::with_endpoints(self.width, self.height, start, boss)
            .generate(config, rng)?;
        let mut tiles = self.build_tiles(&grid);

        let boss_challenge = generate_boss_challenge(self.difficulty, config, rng)?;
        tiles[boss.y][boss.x] = Tile::boss(boss, boss_challenge);

        let mobs = self.place_mobs(&grid, config, rng)?;

        let map = TileMap {
            id: self.id.clone(),
            width: self.width,
            height: self.height,
            tiles,
            difficulty: self.difficulty,
            start_position: start,
            boss_position: boss,
            mobs,
            is_completed: false,
        };

        self.validate(&map, config)?;

        info!(
            "Generated map '{}' ({}x{}, {}) with {} open tiles and {} mobs",
            map.id,
            map.width,
            map.height,
            map.difficulty,
            grid.open_count(),
            map.mobs.len()
        );

        Ok(map)
    }

    fn validate(&self, map: &TileMap, _config: &GenerationConfig) -> MathMazeResult<()> {
        let fail = |message: String| -> MathMazeResult<()> {
            Err(MathMazeError::GenerationFailed(message))
        };

        if map.tiles.len() != map.height || map.tiles.iter().any(|row| row.len() != map.width) {
            return fail(format!("Tile grid does not match {}x{}", map.width, map.height));
        }

        for (y, row) in map.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let pos = Position::new(x, y);
                if tile.position != pos {
                    return fail(format!("Tile at ({}, {}) records position {:?}", x, y, tile.position));
                }
                if tile.tile_type == TileType::Blocked && tile.is_accessible {
                    return fail(format!("Blocked tile at ({}, {}) is accessible", x, y));
                }
                if (tile.tile_type == TileType::Boss) != (pos == map.boss_position) {
                    return fail(format!("Unexpected boss tile state at ({}, {})", x, y));
                }
                if tile.challenge.is_some() != (tile.tile_type == TileType::Boss) {
                    return fail(format!("Unexpected challenge placement at ({}, {})", x, y));
                }
            }
        }

        if !map.is_accessible(map.start_position) || !map.is_accessible(map.boss_position) {
            return fail("Start or boss tile is not accessible".to_string());
        }

        if find_open_path(map.start_position, map.boss_position, map.width, map.height, |pos| {
            map.is_accessible(pos)
        })
        .is_none()
        {
            return fail("Boss is not reachable from start".to_string());
        }

        let reachable = reachable_from(map.start_position, map.width, map.height, |pos| {
            map.is_accessible(pos)
        });
        for mob in &map.mobs {
            if mob.position == map.start_position || mob.position == map.boss_position {
                return fail(format!("Mob {} occupies a critical tile", mob.id));
            }
            if !reachable.contains(&mob.position) {
                return fail(format!("Mob {} is not reachable from start", mob.id));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MapAssembler"
    }
}

/// Generates a complete map, seeding the random number generator from entropy.
///
/// # Examples
///
/// ```
/// use math_maze::{generate_tile_map, DifficultyLevel, Position};
///
/// let map = generate_tile_map("m1", 4, 4, DifficultyLevel::Infant).unwrap();
/// assert_eq!(map.tiles.len(), 4);
/// assert_eq!(map.start_position, Position::new(0, 3));
/// assert_eq!(map.boss_position, Position::new(3, 0));
/// ```
pub fn generate_tile_map(
    id: &str,
    width: usize,
    height: usize,
    difficulty: DifficultyLevel,
) -> MathMazeResult<TileMap> {
    generate_tile_map_with(id, width, height, difficulty, &GenerationConfig::new())
}

/// Generates a complete map using `config`, including its optional seed.
pub fn generate_tile_map_with(
    id: &str,
    width: usize,
    height: usize,
    difficulty: DifficultyLevel,
    config: &GenerationConfig,
) -> MathMazeResult<TileMap> {
    config.validate()?;
    let mut rng = utils::create_rng(config);
    MapAssembler::new(id, width, height, difficulty).generate(config, &mut rng)
}
