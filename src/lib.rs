//! # Math Maze
//!
//! Procedural maze and arithmetic challenge generation for an educational tile game.
//!
//! ## Architecture Overview
//!
//! The player walks a grid maze from the bottom-left corner to a boss tile in the
//! top-right corner, solving arithmetic problems carried by roaming mobs to earn
//! currency. Each solved map advances the difficulty tier.
//!
//! - **Game**: the map data model (tiles, mobs, challenges), difficulty tiers and
//!   the session layer that mutates player state in response to moves and answers
//! - **Generation**: arithmetic operands, challenges, the maze carver and the map
//!   assembler that ties them together
//! - **Utils**: grid search helpers shared by the carver, the validator and tests
//!
//! The two entry points used by outer layers are [`generate_tile_map`] and
//! [`get_next_difficulty`]. Everything the generator returns is plain data and
//! round-trips through JSON.

pub mod game;
pub mod generation;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use utils::*;

/// Core error type for the Math Maze generator and session layer.
#[derive(thiserror::Error, Debug)]
pub enum MathMazeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Map dimensions cannot hold a single tile
    #[error("Invalid map dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Operation tag outside the supported arithmetic operations
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Session action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Session state is invalid
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Generation produced a map that violates its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Math Maze codebase.
pub type MathMazeResult<T> = Result<T, MathMazeError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    use crate::DifficultyLevel;

    /// Side length of maps generated at the lowest tier
    pub const MIN_MAP_SIZE: usize = 12;

    /// Side length of maps generated at the highest tier
    pub const MAX_MAP_SIZE: usize = 24;

    /// Growth of the map side length per difficulty tier
    pub const MAP_SIZE_STEP: usize = 2;

    /// Tier a new session starts at, also the fallback for unknown tags
    pub const DEFAULT_DIFFICULTY: DifficultyLevel = DifficultyLevel::Infant;

    /// Currency awarded per unit of a tier's reward multiplier
    pub const BASE_CHALLENGE_REWARD: u32 = 5;

    /// Smallest boss reward factor a generation config may carry
    pub const MIN_BOSS_REWARD_FACTOR: u32 = 3;
}
