//! # Game Module
//!
//! Map data model, difficulty tiers and session state.
//!
//! This module contains the plain-data building blocks the generators produce
//! and the session layer consumes:
//! - Grid positions and cardinal directions
//! - Difficulty tiers and their per-tier tuning
//! - Arithmetic challenges
//! - Tiles, mobs and tile maps
//! - Player state and the session that mutates it

pub mod challenge;
pub mod difficulty;
pub mod map;
pub mod state;

pub use challenge::*;
pub use difficulty::*;
pub use map::*;
pub use state::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a grid coordinate on a tile map.
///
/// Coordinates are unsigned; stepping off the grid is checked through
/// [`Position::step`] rather than producing negative positions.
///
/// # Examples
///
/// ```
/// use math_maze::Position;
///
/// let pos = Position::new(3, 1);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::Position;
    ///
    /// let pos1 = Position::new(0, 3);
    /// let pos2 = Position::new(3, 0);
    /// assert_eq!(pos1.manhattan_distance(pos2), 6);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Steps `distance` tiles in `direction`, returning `None` when the
    /// result would leave a `width` x `height` grid.
    pub fn step(
        self,
        direction: Direction,
        distance: usize,
        width: usize,
        height: usize,
    ) -> Option<Position> {
        let (x, y) = match direction {
            Direction::North => (Some(self.x), self.y.checked_sub(distance)),
            Direction::South => (Some(self.x), self.y.checked_add(distance)),
            Direction::East => (self.x.checked_add(distance), Some(self.y)),
            Direction::West => (self.x.checked_sub(distance), Some(self.y)),
        };

        match (x, y) {
            (Some(x), Some(y)) if x < width && y < height => Some(Position::new(x, y)),
            _ => None,
        }
    }

    /// Returns the in-bounds cardinal neighbours of this position.
    pub fn cardinal_neighbors(self, width: usize, height: usize) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .filter_map(|direction| self.step(direction, 1, width, height))
            .collect()
    }

    /// Returns the position halfway between two positions on the same row or column.
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

/// Cardinal directions for movement and carving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns all 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Unique identifier for challenges and mobs.
pub type EntityId = Uuid;

/// Creates a new entity ID from bytes drawn from `rng`.
///
/// Seeded generators therefore produce reproducible IDs, while entropy-seeded
/// generators produce IDs as unique as a v4 UUID.
pub fn new_entity_id<R: Rng + ?Sized>(rng: &mut R) -> EntityId {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
        assert_eq!(pos2.manhattan_distance(pos1), 7);
    }

    #[test]
    fn test_position_step_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::North, 1, 4, 4), None);
        assert_eq!(corner.step(Direction::West, 1, 4, 4), None);
        assert_eq!(
            corner.step(Direction::South, 2, 4, 4),
            Some(Position::new(0, 2))
        );
        assert_eq!(
            corner.step(Direction::East, 3, 4, 4),
            Some(Position::new(3, 0))
        );
        assert_eq!(corner.step(Direction::East, 4, 4, 4), None);
    }

    #[test]
    fn test_position_cardinal_neighbors() {
        let center = Position::new(1, 1);
        let neighbors = center.cardinal_neighbors(3, 3);
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.contains(&Position::new(1, 0)));
        assert!(neighbors.contains(&Position::new(0, 1)));
        assert!(!neighbors.contains(&Position::new(0, 0))); // No diagonal

        let corner = Position::new(2, 2);
        assert_eq!(corner.cardinal_neighbors(3, 3).len(), 2);
        assert!(Position::new(0, 0).cardinal_neighbors(1, 1).is_empty());
    }

    #[test]
    fn test_position_midpoint() {
        assert_eq!(
            Position::new(0, 4).midpoint(Position::new(2, 4)),
            Position::new(1, 4)
        );
        assert_eq!(
            Position::new(3, 2).midpoint(Position::new(3, 0)),
            Position::new(3, 1)
        );
    }

    #[test]
    fn test_entity_id_uniqueness() {
        let mut rng = StdRng::seed_from_u64(7);
        let id1 = new_entity_id(&mut rng);
        let id2 = new_entity_id(&mut rng);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entity_id_reproducible_from_seed() {
        let id1 = new_entity_id(&mut StdRng::seed_from_u64(99));
        let id2 = new_entity_id(&mut StdRng::seed_from_u64(99));
        assert_eq!(id1, id2);
    }
}
