//! # Maze Carving
//!
//! Generates a connected open/blocked grid between a start and an end cell.
//!
//! The carver:
//! 1. Carves a randomized depth-first maze on the stride-2 lattice anchored at
//!    the start cell, opening the wall cell between each lattice step
//! 2. Forces the start and end cells open
//! 3. Checks connectivity with a breadth-first search and, if the end is
//!    unreachable, carves a deterministic corridor from start to end
//! 4. Opens a random fraction of interior cells for alternate routes

use crate::utils::{find_open_path, is_connected};
use crate::{
    Direction, GenerationConfig, Generator, MathMazeError, MathMazeResult, Position,
};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Open/blocked grid produced by the carver, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<bool>>,
}

impl MazeGrid {
    /// Creates a fully blocked grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        }
    }

    /// Checks if a position lies on the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Whether `pos` is open; positions off the grid are never open.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cells
            .get(pos.y)
            .and_then(|row| row.get(pos.x))
            .copied()
            .unwrap_or(false)
    }

    /// Opens `pos`; positions off the grid are ignored.
    pub fn open(&mut self, pos: Position) {
        if let Some(cell) = self.cells.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
            *cell = true;
        }
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&open| open).count()
    }

    /// Checks whether `goal` is reachable from `start` through open cells.
    pub fn is_connected(&self, start: Position, goal: Position) -> bool {
        is_connected(start, goal, self.width, self.height, |pos| self.is_open(pos))
    }

    /// Rows of the grid, `true` meaning open.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }
}

/// Carves a connected maze between `start` and `end`.
///
/// `extra_opening_ratio` is the fraction of all cells opened at random in the
/// interior once connectivity is guaranteed. Grids one cell wide or tall
/// degenerate to a straight corridor.
pub fn carve<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    start: Position,
    end: Position,
    extra_opening_ratio: f64,
    rng: &mut R,
) -> MathMazeResult<MazeGrid> {
    if width == 0 || height == 0 {
        return Err(MathMazeError::InvalidDimensions { width, height });
    }

    let mut grid = MazeGrid::new(width, height);
    for endpoint in [start, end] {
        if !grid.contains(endpoint) {
            return Err(MathMazeError::InvalidState(format!(
                "Endpoint ({}, {}) lies outside a {}x{} grid",
                endpoint.x, endpoint.y, width, height
            )));
        }
    }

    if !(0.0..=1.0).contains(&extra_opening_ratio) {
        return Err(MathMazeError::InvalidState(format!(
            "Extra opening ratio must lie in [0, 1], got {}",
            extra_opening_ratio
        )));
    }

    carve_passages(&mut grid, start, rng);
    grid.open(start);
    link_to_lattice(&mut grid, start, end);

    if !grid.is_connected(start, end) {
        debug!(
            "Randomized carve left ({}, {}) unreachable in {}x{} grid, carving fallback corridor",
            end.x, end.y, width, height
        );
        carve_fallback_corridor(&mut grid, start, end);
    }

    add_extra_openings(&mut grid, extra_opening_ratio, rng);

    Ok(grid)
}

/// Pending work for one lattice cell of the depth-first carve.
struct CarveFrame {
    cell: Position,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng + ?Sized>(cell: Position, rng: &mut R) -> Self {
        let mut directions = Direction::cardinal();
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Randomized depth-first carve over the stride-2 lattice anchored at `origin`.
///
/// Uses an explicit stack so the depth is bounded by the heap, not the call
/// stack; each cell tries its four directions in a shuffled order exactly as a
/// recursive carve would.
fn carve_passages<R: Rng + ?Sized>(grid: &mut MazeGrid, origin: Position, rng: &mut R) {
    grid.open(origin);
    let mut stack = vec![CarveFrame::new(origin, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }

        let direction = frame.directions[frame.next];
        frame.next += 1;
        let cell = frame.cell;

        if let Some(neighbor) = cell.step(direction, 2, grid.width, grid.height) {
            if !grid.is_open(neighbor) {
                grid.open(cell.midpoint(neighbor));
                grid.open(neighbor);
                stack.push(CarveFrame::new(neighbor, rng));
            }
        }
    }
}

/// Opens `end` and joins it to the nearest lattice cell anchored at `origin`.
///
/// A coordinate of `end` at odd distance from the origin is pulled one step
/// inwards. Every in-bounds lattice cell is open after the carve, so this
/// connects `end` unless the carve itself failed.
fn link_to_lattice(grid: &mut MazeGrid, origin: Position, end: Position) {
    let snap = |value: usize, anchor: usize| {
        if value.abs_diff(anchor) % 2 == 0 {
            value
        } else if value > 0 {
            value - 1
        } else {
            value + 1
        }
    };

    let anchor = Position::new(snap(end.x, origin.x), snap(end.y, origin.y));
    carve_fallback_corridor(grid, anchor, end);
}

/// Opens a corridor from `start` to `end`, stepping one axis at a time and
/// alternating axes while both still have distance left.
fn carve_fallback_corridor(grid: &mut MazeGrid, start: Position, end: Position) {
    let mut current = start;
    let mut prefer_horizontal = true;
    grid.open(current);

    while current != end {
        let horizontal_left = current.x != end.x;
        let vertical_left = current.y != end.y;

        if horizontal_left && (prefer_horizontal || !vertical_left) {
            current.x = if end.x > current.x { current.x + 1 } else { current.x - 1 };
        } else {
            current.y = if end.y > current.y { current.y + 1 } else { current.y - 1 };
        }

        prefer_horizontal = !prefer_horizontal;
        grid.open(current);
    }
}

/// Opens `floor(width * height * ratio)` random interior cells.
fn add_extra_openings<R: Rng + ?Sized>(grid: &mut MazeGrid, ratio: f64, rng: &mut R) {
    if grid.width < 3 || grid.height < 3 || ratio <= 0.0 {
        return;
    }

    let count = ((grid.width * grid.height) as f64 * ratio).floor() as usize;
    for _ in 0..count {
        let x = rng.gen_range(1..grid.width - 1);
        let y = rng.gen_range(1..grid.height - 1);
        grid.open(Position::new(x, y));
    }

    debug!(
        "Opened up to {} extra cells in {}x{} grid",
        count, grid.width, grid.height
    );
}

/// Maze generator for a fixed grid size and pair of endpoints.
#[derive(Debug, Clone)]
pub struct MazeCarver {
    pub width: usize,
    pub height: usize,
    pub start: Position,
    pub end: Position,
}

impl MazeCarver {
    /// Creates a carver from the bottom-left corner to the top-right corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::{MazeCarver, Position};
    ///
    /// let carver = MazeCarver::new(4, 4);
    /// assert_eq!(carver.start, Position::new(0, 3));
    /// assert_eq!(carver.end, Position::new(3, 0));
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            start: Position::new(0, height.saturating_sub(1)),
            end: Position::new(width.saturating_sub(1), 0),
        }
    }

    /// Creates a carver with explicit endpoints.
    pub fn with_endpoints(width: usize, height: usize, start: Position, end: Position) -> Self {
        Self {
            width,
            height,
            start,
            end,
        }
    }
}

impl Generator<MazeGrid> for MazeCarver {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MathMazeResult<MazeGrid> {
        let grid = carve(
            self.width,
            self.height,
            self.start,
            self.end,
            config.extra_opening_ratio,
            rng,
        )?;
        self.validate(&grid, config)?;
        Ok(grid)
    }

    fn validate(&self, grid: &MazeGrid, _config: &GenerationConfig) -> MathMazeResult<()> {
        if grid.width != self.width || grid.height != self.height {
            return Err(MathMazeError::GenerationFailed(format!(
                "Grid is {}x{}, expected {}x{}",
                grid.width, grid.height, self.width, self.height
            )));
        }

        if find_open_path(self.start, self.end, grid.width, grid.height, |pos| grid.is_open(pos))
            .is_none()
        {
            return Err(MathMazeError::GenerationFailed(
                "End is not reachable from start".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MazeCarver"
    }
}
