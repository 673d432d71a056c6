//! # Tile Maps
//!
//! Grid representation of a single generated map: tiles, the boss challenge
//! and the roaming mobs that carry regular challenges.

use crate::{DifficultyLevel, EntityId, MathChallenge, Position};
use serde::{Deserialize, Serialize};

/// Kind of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Open floor the player can walk on
    Empty,
    /// The boss tile, carrying the map's gating challenge
    Boss,
    /// Wall
    Blocked,
}

/// A single grid cell.
///
/// A blocked tile is never accessible, and only the boss tile carries a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub position: Position,
    #[serde(rename = "type")]
    pub tile_type: TileType,
    pub is_accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<MathChallenge>,
    /// For the boss tile, whether the boss has been defeated
    pub is_completed: bool,
}

impl Tile {
    /// Creates a blocked, inaccessible tile.
    pub fn blocked(position: Position) -> Self {
        Self {
            position,
            tile_type: TileType::Blocked,
            is_accessible: false,
            challenge: None,
            is_completed: false,
        }
    }

    /// Creates an open, accessible tile.
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            tile_type: TileType::Empty,
            is_accessible: true,
            challenge: None,
            is_completed: false,
        }
    }

    /// Creates the accessible boss tile carrying `challenge`.
    pub fn boss(position: Position, challenge: MathChallenge) -> Self {
        Self {
            position,
            tile_type: TileType::Boss,
            is_accessible: true,
            challenge: Some(challenge),
            is_completed: false,
        }
    }
}

/// A roaming challenge bearer.
///
/// Unlike tiles, a mob's position changes as it wanders the open cells of its map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mob {
    pub id: EntityId,
    pub position: Position,
    pub challenge: MathChallenge,
    /// Index into the renderer's mob sprite sheet
    pub sprite_variant: u8,
    pub is_completed: bool,
}

/// A complete generated map.
///
/// Tiles are indexed `tiles[y][x]`. The start and boss tiles are always
/// accessible and connected by a 4-directional path of accessible tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileMap {
    pub id: String,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Vec<Tile>>,
    pub difficulty: DifficultyLevel,
    pub start_position: Position,
    pub boss_position: Position,
    #[serde(default)]
    pub mobs: Vec<Mob>,
    pub is_completed: bool,
}

impl TileMap {
    /// Checks if a position lies on this map.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Gets the tile at a position.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(pos.y).and_then(|row| row.get(pos.x))
    }

    /// Gets the tile at a position mutably.
    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(pos.y).and_then(|row| row.get_mut(pos.x))
    }

    /// Whether the player may stand on `pos`.
    pub fn is_accessible(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(|tile| tile.is_accessible)
    }

    /// All accessible positions in row-major order.
    pub fn open_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.is_accessible)
            .map(|tile| tile.position)
            .collect()
    }

    /// Accessible cardinal neighbours of `pos`.
    pub fn accessible_neighbors(&self, pos: Position) -> Vec<Position> {
        pos.cardinal_neighbors(self.width, self.height)
            .into_iter()
            .filter(|&neighbor| self.is_accessible(neighbor))
            .collect()
    }

    /// The boss tile.
    pub fn boss_tile(&self) -> Option<&Tile> {
        self.get_tile(self.boss_position)
    }

    /// The boss challenge, if the boss tile carries one.
    pub fn boss_challenge(&self) -> Option<&MathChallenge> {
        self.boss_tile().and_then(|tile| tile.challenge.as_ref())
    }

    /// Whether the boss challenge has been solved.
    pub fn is_boss_defeated(&self) -> bool {
        self.boss_tile().is_some_and(|tile| tile.is_completed)
    }

    /// Gets a mob by ID.
    pub fn get_mob(&self, id: EntityId) -> Option<&Mob> {
        self.mobs.iter().find(|mob| mob.id == id)
    }

    /// Gets a mob by ID mutably.
    pub fn get_mob_mut(&mut self, id: EntityId) -> Option<&mut Mob> {
        self.mobs.iter_mut().find(|mob| mob.id == id)
    }

    /// Gets the undefeated mob standing on `pos`, if any.
    pub fn active_mob_at(&self, pos: Position) -> Option<&Mob> {
        self.mobs
            .iter()
            .find(|mob| !mob.is_completed && mob.position == pos)
    }

    /// Number of mobs still carrying an unsolved challenge.
    pub fn active_mob_count(&self) -> usize {
        self.mobs.iter().filter(|mob| !mob.is_completed).count()
    }

    /// Plain-text preview for debugging: `#` wall, `.` floor, `S` start,
    /// `B` boss, `m` undefeated mob.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in &self.tiles {
            for tile in row {
                let glyph = if tile.position == self.boss_position {
                    'B'
                } else if tile.position == self.start_position {
                    'S'
                } else if self.active_mob_at(tile.position).is_some() {
                    'm'
                } else if tile.is_accessible {
                    '.'
                } else {
                    '#'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
