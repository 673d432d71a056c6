//! # Difficulty Progression
//!
//! Ordered difficulty tiers and the per-tier tuning table that drives operand
//! ranges, allowed operations, rewards, mob density and map size.

use crate::{config, MathMazeError, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the difficulty progression, ordered from easiest to hardest.
///
/// Serialises as its lowercase tag. Deserialisation is lossy: an unknown tag
/// (e.g. from corrupted save data) falls back to
/// [`config::DEFAULT_DIFFICULTY`] instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DifficultyLevel {
    Infant,
    Toddler,
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Inclusive operand range for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandRange {
    pub min: u32,
    pub max: u32,
}

impl OperandRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Tuning for a single difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Range both operands are drawn from
    pub operand_range: OperandRange,
    /// Operations a challenge at this tier may use
    pub allowed_operations: &'static [Operation],
    /// Reward multiplier applied to [`config::BASE_CHALLENGE_REWARD`]
    pub reward_multiplier: u32,
    /// Fraction of open cells populated with mobs
    pub density: f64,
    /// Side length of maps generated at this tier
    pub map_size: usize,
}

impl DifficultyProfile {
    /// Reward granted for solving a regular challenge at this tier.
    pub fn reward(&self) -> u32 {
        config::BASE_CHALLENGE_REWARD * self.reward_multiplier
    }
}

const ADDITION_ONLY: &[Operation] = &[Operation::Addition];
const ADDITIVE: &[Operation] = &[Operation::Addition, Operation::Subtraction];
const NO_DIVISION: &[Operation] = &[
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
];
const ALL_OPERATIONS: &[Operation] = &[
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
    Operation::Division,
];

impl DifficultyLevel {
    /// All tiers in progression order.
    pub const ALL: [DifficultyLevel; 7] = [
        DifficultyLevel::Infant,
        DifficultyLevel::Toddler,
        DifficultyLevel::Beginner,
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::Expert,
    ];

    /// The easiest tier.
    pub fn lowest() -> Self {
        Self::ALL[0]
    }

    /// The hardest tier.
    pub fn highest() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Position of this tier in the progression.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the next tier, saturating at the highest.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::DifficultyLevel;
    ///
    /// assert_eq!(DifficultyLevel::Infant.next(), DifficultyLevel::Toddler);
    /// assert_eq!(DifficultyLevel::Expert.next(), DifficultyLevel::Expert);
    /// ```
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Lowercase tag used in serialised maps and save data.
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Infant => "infant",
            DifficultyLevel::Toddler => "toddler",
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Expert => "expert",
        }
    }

    /// Parses a tag from untrusted input, falling back to the default tier.
    pub fn parse_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            log::warn!(
                "Unknown difficulty '{}', falling back to {}",
                tag,
                config::DEFAULT_DIFFICULTY
            );
            config::DEFAULT_DIFFICULTY
        })
    }

    /// Looks up the tuning for this tier.
    pub fn profile(self) -> DifficultyProfile {
        let (min, max, allowed_operations, reward_multiplier, density) = match self {
            DifficultyLevel::Infant => (1, 5, ADDITION_ONLY, 1, 0.15),
            DifficultyLevel::Toddler => (1, 10, ADDITION_ONLY, 2, 0.18),
            DifficultyLevel::Beginner => (1, 15, ADDITIVE, 3, 0.21),
            DifficultyLevel::Easy => (1, 20, ADDITIVE, 4, 0.25),
            DifficultyLevel::Medium => (2, 25, NO_DIVISION, 6, 0.28),
            DifficultyLevel::Hard => (2, 50, ALL_OPERATIONS, 8, 0.32),
            DifficultyLevel::Expert => (5, 100, ALL_OPERATIONS, 10, 0.35),
        };

        DifficultyProfile {
            operand_range: OperandRange::new(min, max),
            allowed_operations,
            reward_multiplier,
            density,
            map_size: (config::MIN_MAP_SIZE + self.index() * config::MAP_SIZE_STEP)
                .min(config::MAX_MAP_SIZE),
        }
    }
}

/// Returns the tier after `current`; advancing past the last tier is a no-op.
pub fn get_next_difficulty(current: DifficultyLevel) -> DifficultyLevel {
    current.next()
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        config::DEFAULT_DIFFICULTY
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = MathMazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MathMazeError::InvalidState(format!("Unknown difficulty: {}", s)))
    }
}

impl From<String> for DifficultyLevel {
    fn from(tag: String) -> Self {
        Self::parse_lossy(&tag)
    }
}

impl From<DifficultyLevel> for String {
    fn from(level: DifficultyLevel) -> Self {
        level.as_str().to_string()
    }
}
