//! # Grid Search
//!
//! Breadth-first search helpers over 4-connected grids, used for the carver's
//! connectivity check, map validation and mob movement.

use crate::Position;
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Finds a shortest 4-directional path of open cells from `start` to `goal`.
///
/// Returns the path including both endpoints, or `None` when either endpoint is
/// closed or no path exists.
pub fn find_open_path<F>(
    start: Position,
    goal: Position,
    width: usize,
    height: usize,
    is_open: F,
) -> Option<Vec<Position>>
where
    F: Fn(Position) -> bool,
{
    if !is_open(start) || !is_open(goal) {
        return None;
    }

    bfs(
        &start,
        |&pos| open_neighbors(pos, width, height, &is_open),
        |&pos| pos == goal,
    )
}

/// Checks whether `goal` can be reached from `start` through open cells.
pub fn is_connected<F>(start: Position, goal: Position, width: usize, height: usize, is_open: F) -> bool
where
    F: Fn(Position) -> bool,
{
    find_open_path(start, goal, width, height, is_open).is_some()
}

/// Collects every open cell reachable from `start`, including `start` itself.
pub fn reachable_from<F>(start: Position, width: usize, height: usize, is_open: F) -> HashSet<Position>
where
    F: Fn(Position) -> bool,
{
    if !is_open(start) {
        return HashSet::new();
    }

    bfs_reach(start, |&pos| open_neighbors(pos, width, height, &is_open)).collect()
}

fn open_neighbors<F>(pos: Position, width: usize, height: usize, is_open: &F) -> Vec<Position>
where
    F: Fn(Position) -> bool,
{
    pos.cardinal_neighbors(width, height)
        .into_iter()
        .filter(|&neighbor| is_open(neighbor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// . . #
    /// # . #
    /// . . .
    /// ```
    fn sample_grid(pos: Position) -> bool {
        const GRID: [[bool; 3]; 3] = [
            [true, true, false],
            [false, true, false],
            [true, true, true],
        ];
        GRID[pos.y][pos.x]
    }

    #[test]
    fn test_find_open_path() {
        let path = find_open_path(Position::new(0, 0), Position::new(2, 2), 3, 3, sample_grid)
            .expect("path should exist");
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_closed_endpoint_has_no_path() {
        assert!(find_open_path(Position::new(0, 0), Position::new(2, 0), 3, 3, sample_grid).is_none());
        assert!(!is_connected(Position::new(0, 1), Position::new(0, 0), 3, 3, sample_grid));
    }

    #[test]
    fn test_reachable_from() {
        let reachable = reachable_from(Position::new(0, 2), 3, 3, sample_grid);
        assert_eq!(reachable.len(), 7);
        assert!(!reachable.contains(&Position::new(2, 0)));

        assert!(reachable_from(Position::new(2, 0), 3, 3, sample_grid).is_empty());
    }

    #[test]
    fn test_single_cell_grid() {
        let origin = Position::new(0, 0);
        assert!(is_connected(origin, origin, 1, 1, |_| true));
    }
}
