//! # Game State Module
//!
//! Player state and the session layer that applies the state-update contract
//! to generated maps.
//!
//! The generator never reads or writes player state. [`GameSession`] owns the
//! current map and the player, asks the generator for a new map on every level
//! advance, and is the only place player state changes.

use crate::{
    config, generate_tile_map_with, Direction, DifficultyLevel, EntityId, GenerationConfig,
    Generator, MapAssembler, MathMazeError, MathMazeResult, Position, TileMap,
};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Progress accumulated by the player across maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Currency earned from solved challenges
    pub currency: u32,
    /// IDs of maps whose boss has been defeated
    pub completed_maps: Vec<String>,
    /// Number of challenges solved
    pub total_challenges_completed: u32,
    /// Consecutive correct answers
    pub current_streak: u32,
    /// Longest run of consecutive correct answers
    pub best_streak: u32,
    /// Tile the player stands on; always accessible in the current map
    pub current_position: Position,
}

impl PlayerState {
    /// Creates a fresh player standing on `position`.
    pub fn new(position: Position) -> Self {
        Self {
            currency: 0,
            completed_maps: Vec::new(),
            total_challenges_completed: 0,
            current_streak: 0,
            best_streak: 0,
            current_position: position,
        }
    }

    /// Records a correct answer worth `reward`.
    pub fn record_correct(&mut self, reward: u32) {
        self.currency = self.currency.saturating_add(reward);
        self.total_challenges_completed += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    /// Records a wrong answer.
    pub fn record_incorrect(&mut self) {
        self.current_streak = 0;
    }
}

/// Challenge a player is answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeTarget {
    /// The challenge carried by a mob
    Mob(EntityId),
    /// The boss challenge of the current map
    Boss,
}

/// Result of a movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player moved onto an empty tile
    Moved,
    /// The target is off the map or not accessible; the player did not move
    Blocked,
    /// The player moved onto an undefeated mob
    MobEncounter { mob_id: EntityId },
    /// The player moved onto the undefeated boss tile
    BossEncounter,
}

/// Result of answering a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// The answer was correct and `reward` currency was granted
    Correct { reward: u32 },
    /// The answer was wrong; the challenge stays open
    Incorrect { expected: u32 },
}

/// A play session: the current map, the player, and the generation settings
/// used for subsequent maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    /// The authoritative map for the current level
    pub map: TileMap,
    /// The player's accumulated progress
    pub player: PlayerState,
    /// Number of maps generated so far in this session
    pub maps_generated: u64,
    /// Generation settings for future maps
    #[serde(default)]
    pub config: GenerationConfig,
}

impl GameSession {
    /// Starts a session at the default difficulty with the player on the first
    /// map's start tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use math_maze::{GameSession, GenerationConfig};
    ///
    /// let session = GameSession::new(GenerationConfig::seeded(12345)).unwrap();
    /// assert_eq!(session.player.current_position, session.map.start_position);
    /// assert_eq!(session.player.currency, 0);
    /// ```
    pub fn new(config: GenerationConfig) -> MathMazeResult<Self> {
        let map = Self::generate_map(&config, 0, config::DEFAULT_DIFFICULTY)?;
        let player = PlayerState::new(map.start_position);

        Ok(Self {
            map,
            player,
            maps_generated: 1,
            config,
        })
    }

    fn generate_map(
        config: &GenerationConfig,
        index: u64,
        difficulty: DifficultyLevel,
    ) -> MathMazeResult<TileMap> {
        let size = difficulty.profile().map_size;
        let id = format!("map-{}", index + 1);
        generate_tile_map_with(&id, size, size, difficulty, &config.for_map(index))
    }

    /// Current difficulty tier.
    pub fn difficulty(&self) -> DifficultyLevel {
        self.map.difficulty
    }

    /// Moves the player one tile in `direction`.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let target = match self
            .player
            .current_position
            .step(direction, 1, self.map.width, self.map.height)
        {
            Some(target) if self.map.is_accessible(target) => target,
            _ => return MoveOutcome::Blocked,
        };

        self.player.current_position = target;

        if target == self.map.boss_position && !self.map.is_boss_defeated() {
            return MoveOutcome::BossEncounter;
        }

        match self.map.active_mob_at(target) {
            Some(mob) => MoveOutcome::MobEncounter { mob_id: mob.id },
            None => MoveOutcome::Moved,
        }
    }

    /// Answers the challenge carried by `target`, which must share the
    /// player's tile.
    ///
    /// A correct answer completes the challenge (completion never reverts),
    /// grants its reward and extends the streak; defeating the boss completes
    /// the map. A wrong answer resets the streak and leaves the challenge open.
    pub fn complete_challenge(
        &mut self,
        target: ChallengeTarget,
        answer: u32,
    ) -> MathMazeResult<ChallengeOutcome> {
        let challenge = match target {
            ChallengeTarget::Mob(id) => {
                let mob = self
                    .map
                    .get_mob(id)
                    .ok_or_else(|| MathMazeError::InvalidAction(format!("No mob {} on this map", id)))?;
                if mob.is_completed {
                    return Err(MathMazeError::InvalidAction(format!("Mob {} is already defeated", id)));
                }
                if mob.position != self.player.current_position {
                    return Err(MathMazeError::InvalidAction(format!(
                        "Player is not standing on mob {}",
                        id
                    )));
                }
                mob.challenge.clone()
            }
            ChallengeTarget::Boss => {
                if self.map.is_boss_defeated() {
                    return Err(MathMazeError::InvalidAction("Boss is already defeated".to_string()));
                }
                if self.player.current_position != self.map.boss_position {
                    return Err(MathMazeError::InvalidAction(
                        "Player is not standing on the boss tile".to_string(),
                    ));
                }
                self.map
                    .boss_challenge()
                    .cloned()
                    .ok_or_else(|| MathMazeError::InvalidState("Map has no boss challenge".to_string()))?
            }
        };

        if !challenge.is_correct(answer) {
            self.player.record_incorrect();
            return Ok(ChallengeOutcome::Incorrect {
                expected: challenge.correct_answer,
            });
        }

        match target {
            ChallengeTarget::Mob(id) => {
                if let Some(mob) = self.map.get_mob_mut(id) {
                    mob.is_completed = true;
                }
            }
            ChallengeTarget::Boss => {
                let boss_position = self.map.boss_position;
                if let Some(tile) = self.map.get_tile_mut(boss_position) {
                    tile.is_completed = true;
                }
                self.map.is_completed = true;
                self.player.completed_maps.push(self.map.id.clone());
                info!("Boss defeated, map '{}' completed", self.map.id);
            }
        }

        self.player.record_correct(challenge.reward);
        Ok(ChallengeOutcome::Correct {
            reward: challenge.reward,
        })
    }

    /// Replaces the completed map with a new one at the next difficulty tier and
    /// moves the player to its start.
    pub fn advance_map(&mut self) -> MathMazeResult<()> {
        if !self.map.is_completed {
            return Err(MathMazeError::InvalidAction(format!(
                "Map '{}' is not completed yet",
                self.map.id
            )));
        }

        let difficulty = self.map.difficulty.next();
        let map = Self::generate_map(&self.config, self.maps_generated, difficulty)?;

        info!("Advancing to map '{}' at {} difficulty", map.id, difficulty);

        self.player.current_position = map.start_position;
        self.map = map;
        self.maps_generated += 1;
        Ok(())
    }

    /// Moves every undefeated mob one step to a random free accessible neighbour.
    ///
    /// Mobs never step onto the start, the boss, the player or another mob, and
    /// stay put when boxed in. Called on a timer by the outer layer.
    pub fn tick_mobs<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut occupied: HashSet<Position> = self
            .map
            .mobs
            .iter()
            .filter(|mob| !mob.is_completed)
            .map(|mob| mob.position)
            .collect();
        occupied.insert(self.map.start_position);
        occupied.insert(self.map.boss_position);
        occupied.insert(self.player.current_position);

        for index in 0..self.map.mobs.len() {
            let mob = &self.map.mobs[index];
            if mob.is_completed {
                continue;
            }

            let from = mob.position;
            let choices: Vec<Position> = self
                .map
                .accessible_neighbors(from)
                .into_iter()
                .filter(|pos| !occupied.contains(pos))
                .collect();

            if let Some(&to) = choices.choose(rng) {
                occupied.remove(&from);
                occupied.insert(to);
                self.map.mobs[index].position = to;
            }
        }
    }

    /// Saves the session to JSON.
    pub fn save_to_json(&self) -> MathMazeResult<String> {
        serde_json::to_string_pretty(self).map_err(MathMazeError::from)
    }

    /// Loads a session from JSON.
    ///
    /// The map must pass the same structural checks as a freshly generated one.
    /// Unknown difficulty tags fall back to the default tier; a player position
    /// that is not accessible on the loaded map is reset to the map's start.
    pub fn load_from_json(json: &str) -> MathMazeResult<Self> {
        let mut session: Self = serde_json::from_str(json)?;
        session.config.validate()?;

        let map = &session.map;
        MapAssembler::new(map.id.clone(), map.width, map.height, map.difficulty)
            .validate(map, &session.config)
            .map_err(|e| MathMazeError::InvalidState(format!("Saved map '{}' is invalid: {}", map.id, e)))?;

        if !session.map.is_accessible(session.player.current_position) {
            log::warn!(
                "Saved player position {:?} is not accessible, resetting to start",
                session.player.current_position
            );
            session.player.current_position = session.map.start_position;
        }
        Ok(session)
    }
}
