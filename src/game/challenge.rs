//! # Challenges
//!
//! Arithmetic operations and the challenge records carried by mobs and boss tiles.

use crate::{DifficultyLevel, EntityId, MathMazeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arithmetic operation a challenge asks the player to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Symbol used when presenting the problem, e.g. `7 × 3`.
    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = MathMazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "+" => Ok(Operation::Addition),
            "subtraction" | "-" => Ok(Operation::Subtraction),
            "multiplication" | "*" | "×" => Ok(Operation::Multiplication),
            "division" | "/" | "÷" => Ok(Operation::Division),
            _ => Err(MathMazeError::InvalidOperation(s.to_string())),
        }
    }
}

/// A fully specified arithmetic problem.
///
/// `correct_answer` always equals the operation applied to `operands`; division
/// operands divide exactly and subtraction answers are absolute differences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathChallenge {
    pub id: EntityId,
    pub operation: Operation,
    pub operands: [u32; 2],
    pub correct_answer: u32,
    pub difficulty: DifficultyLevel,
    pub reward: u32,
}

impl MathChallenge {
    /// Checks a submitted answer.
    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }

    /// Human-readable problem text without the answer.
    ///
    /// Subtraction is presented larger-first so the text matches the
    /// absolute-difference answer.
    pub fn prompt(&self) -> String {
        let [a, b] = self.operands;
        let (left, right) = match self.operation {
            Operation::Subtraction => (a.max(b), a.min(b)),
            _ => (a, b),
        };
        format!("{} {} {}", left, self.operation.symbol(), right)
    }
}
