//! # Generation Module
//!
//! Procedural content generation for maps and challenges.
//!
//! This module provides the generators the session layer calls on every map
//! transition: arithmetic operands, challenges, the maze carver and the map
//! assembler. Every generator draws from an explicitly injected random number
//! generator so tests can seed it, while default configurations seed from
//! system entropy on each call.

pub mod arithmetic;
pub mod assembler;
pub mod challenges;
pub mod maze;

pub use arithmetic::*;
pub use assembler::*;
pub use challenges::*;
pub use maze::*;

use crate::{config, MathMazeError, MathMazeResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Controls the random seed and the tunable heuristics of the carver and the
/// challenge factory. Per-tier tuning lives in
/// [`DifficultyLevel::profile`](crate::DifficultyLevel::profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Fraction of all cells opened at random after the maze is connected
    pub extra_opening_ratio: f64,
    /// Reward multiplier applied to the boss challenge
    pub boss_reward_factor: u32,
    /// Upper bound for multiplication operands and division divisors
    pub multiplication_cap: u32,
    /// Number of mob sprite variants the renderer provides
    pub sprite_variants: u8,
}

impl GenerationConfig {
    /// Creates a default generation configuration seeded from entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert!(config.seed.is_none());
    /// assert_eq!(config.boss_reward_factor, 3);
    /// ```
    pub fn new() -> Self {
        Self {
            seed: None,
            extra_opening_ratio: 0.10,
            boss_reward_factor: 3,
            multiplication_cap: 12,
            sprite_variants: 4,
        }
    }

    /// Creates a default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    /// Creates a configuration for testing: seeded, and without extra openings
    /// so carved mazes keep their pure corridor structure.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            extra_opening_ratio: 0.0,
            ..Self::new()
        }
    }

    /// Derives the configuration for the `index`-th map of a session.
    ///
    /// Seeded sessions get a distinct but reproducible seed per map.
    pub fn for_map(&self, index: u64) -> Self {
        Self {
            seed: self
                .seed
                .map(|seed| seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))),
            ..self.clone()
        }
    }

    /// Loads a configuration from JSON; missing fields take their defaults.
    ///
    /// The loaded values must pass [`GenerationConfig::validate`].
    pub fn from_json(json: &str) -> MathMazeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> MathMazeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that the tunables keep generation bounded and the boss worth
    /// at least [`config::MIN_BOSS_REWARD_FACTOR`] regular rewards.
    pub fn validate(&self) -> MathMazeResult<()> {
        if self.boss_reward_factor < config::MIN_BOSS_REWARD_FACTOR {
            return Err(MathMazeError::InvalidState(format!(
                "boss_reward_factor must be at least {}, got {}",
                config::MIN_BOSS_REWARD_FACTOR,
                self.boss_reward_factor
            )));
        }

        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.extra_opening_ratio) {
            return Err(MathMazeError::InvalidState(format!(
                "extra_opening_ratio must lie in [0, 1], got {}",
                self.extra_opening_ratio
            )));
        }

        if self.multiplication_cap == 0 {
            return Err(MathMazeError::InvalidState(
                "multiplication_cap must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for procedural generators.
///
/// Generators carry their own parameters (dimensions, difficulty, ...) and
/// produce content from a configuration and an injected random number generator.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MathMazeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> MathMazeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a random number generator from the config.
    ///
    /// A fresh generator is created for every call, so concurrent generations
    /// never share random state.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
