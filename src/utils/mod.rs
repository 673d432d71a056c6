//! # Utilities Module
//!
//! Grid search helpers shared by the generators and the session layer.

pub mod pathfinding;

pub use self::pathfinding::*;
