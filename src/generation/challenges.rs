//! # Challenge Generation
//!
//! Builds fully specified arithmetic challenges for a difficulty tier, and the
//! boss variant that is one tier harder and worth a multiple of the reward.

use crate::{
    calculate_answer, generate_operands_capped, new_entity_id, DifficultyLevel, GenerationConfig,
    Generator, MathChallenge, MathMazeError, MathMazeResult,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Which kind of challenge a [`ChallengeFactory`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// Regular challenge at the factory's tier
    Regular,
    /// Boss challenge one tier above the factory's tier
    Boss,
}

/// Challenge generator for a single map difficulty.
#[derive(Debug, Clone)]
pub struct ChallengeFactory {
    /// Nominal difficulty of the map the challenges belong to
    pub difficulty: DifficultyLevel,
    /// Kind of challenge produced by [`Generator::generate`]
    pub kind: ChallengeKind,
}

impl ChallengeFactory {
    /// Creates a factory producing regular challenges at `difficulty`.
    pub fn new(difficulty: DifficultyLevel) -> Self {
        Self {
            difficulty,
            kind: ChallengeKind::Regular,
        }
    }

    /// Creates a factory producing boss challenges for maps at `difficulty`.
    pub fn boss(difficulty: DifficultyLevel) -> Self {
        Self {
            difficulty,
            kind: ChallengeKind::Boss,
        }
    }

    /// Generates a regular challenge at this factory's difficulty.
    pub fn generate_challenge<R: Rng + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> MathMazeResult<MathChallenge> {
        generate_challenge(self.difficulty, config, rng)
    }

    /// Generates a boss challenge for a map at this factory's difficulty.
    pub fn generate_boss_challenge<R: Rng + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> MathMazeResult<MathChallenge> {
        generate_boss_challenge(self.difficulty, config, rng)
    }
}

/// Generates a regular challenge at `difficulty`.
///
/// The operation is picked uniformly from the tier's allowed operations and the
/// reward comes from the tier's reward table.
pub fn generate_challenge<R: Rng + ?Sized>(
    difficulty: DifficultyLevel,
    config: &GenerationConfig,
    rng: &mut R,
) -> MathMazeResult<MathChallenge> {
    let profile = difficulty.profile();
    let operation = *profile.allowed_operations.choose(rng).ok_or_else(|| {
        MathMazeError::InvalidState(format!("No operations allowed at {}", difficulty))
    })?;

    let operands =
        generate_operands_capped(operation, profile.operand_range, config.multiplication_cap, rng);
    let correct_answer = calculate_answer(operation, operands)?;

    Ok(MathChallenge {
        id: new_entity_id(rng),
        operation,
        operands,
        correct_answer,
        difficulty,
        reward: profile.reward(),
    })
}

/// Generates the boss challenge for a map at `difficulty`.
///
/// The challenge is generated one tier above the map (saturating at the
/// highest tier) and its reward is multiplied by the configured boss factor.
pub fn generate_boss_challenge<R: Rng + ?Sized>(
    difficulty: DifficultyLevel,
    config: &GenerationConfig,
    rng: &mut R,
) -> MathMazeResult<MathChallenge> {
    config.validate()?;
    let tier = difficulty.next();
    let mut challenge = generate_challenge(tier, config, rng)?;
    challenge.reward = boss_reward(tier, config)?;
    Ok(challenge)
}

fn boss_reward(tier: DifficultyLevel, config: &GenerationConfig) -> MathMazeResult<u32> {
    tier.profile()
        .reward()
        .checked_mul(config.boss_reward_factor)
        .ok_or_else(|| {
            MathMazeError::GenerationFailed(format!(
                "Boss reward at {} overflows with factor {}",
                tier, config.boss_reward_factor
            ))
        })
}

impl Generator<MathChallenge> for ChallengeFactory {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MathMazeResult<MathChallenge> {
        let challenge = match self.kind {
            ChallengeKind::Regular => self.generate_challenge(config, rng)?,
            ChallengeKind::Boss => self.generate_boss_challenge(config, rng)?,
        };
        self.validate(&challenge, config)?;
        Ok(challenge)
    }

    fn validate(&self, challenge: &MathChallenge, config: &GenerationConfig) -> MathMazeResult<()> {
        let expected = calculate_answer(challenge.operation, challenge.operands)?;
        if expected != challenge.correct_answer {
            return Err(MathMazeError::GenerationFailed(format!(
                "Challenge {} expects {} but {} was recorded",
                challenge.id, expected, challenge.correct_answer
            )));
        }

        let (tier, reward) = match self.kind {
            ChallengeKind::Regular => (self.difficulty, self.difficulty.profile().reward()),
            ChallengeKind::Boss => {
                let tier = self.difficulty.next();
                (tier, boss_reward(tier, config)?)
            }
        };

        if challenge.difficulty != tier || challenge.reward != reward {
            return Err(MathMazeError::GenerationFailed(format!(
                "Challenge {} has tier {} and reward {}, expected {} and {}",
                challenge.id, challenge.difficulty, challenge.reward, tier, reward
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ChallengeFactory"
    }
}
