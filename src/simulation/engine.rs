//! Batch simulation engine — resolves N independent battles from one config.
//!
//! Each trial owns its own combatant pair and its own `SmallRng` seeded from
//! the batch seed plus the trial index, so trials are independent and the
//! whole batch is reproducible from `(config, num_battles, seed)`. Trials
//! share no mutable state and run in parallel on the rayon pool.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::battle::{BattleEngine, Outcome, Winner};
use crate::combatant::Combatant;
use crate::constants::{DEFAULT_ATTACKER_MAX_DICE, DEFAULT_DEFENDER_MAX_DICE};
use crate::error::ConfigError;

/// Starting parameters for one battle. Serializable so statistics output can
/// embed the configuration it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    pub attacker_troops: u32,
    pub defender_troops: u32,
    pub attacker_max_dice: u32,
    pub defender_max_dice: u32,
}

impl BattleConfig {
    /// Config with the conventional dice ceilings (attacker 3, defender 2).
    pub fn new(attacker_troops: u32, defender_troops: u32) -> Self {
        Self {
            attacker_troops,
            defender_troops,
            attacker_max_dice: DEFAULT_ATTACKER_MAX_DICE,
            defender_max_dice: DEFAULT_DEFENDER_MAX_DICE,
        }
    }

    /// Override both dice ceilings.
    pub fn with_max_dice(mut self, defender_max_dice: u32, attacker_max_dice: u32) -> Self {
        self.defender_max_dice = defender_max_dice;
        self.attacker_max_dice = attacker_max_dice;
        self
    }

    /// Construct a validated engine for one battle from this config.
    pub fn build(&self) -> Result<BattleEngine, ConfigError> {
        let attacker = Combatant::attacker(self.attacker_troops, self.attacker_max_dice)?;
        let defender = Combatant::defender(self.defender_troops, self.defender_max_dice)?;
        Ok(BattleEngine::new(attacker, defender))
    }
}

/// Results of a batch of battles.
pub struct BatchResult {
    pub outcomes: Vec<Outcome>,
    pub defender_wins: u64,
    pub attacker_wins: u64,
    pub defender_win_rate: f64,
    pub mean_rounds: f64,
    pub elapsed: std::time::Duration,
}

/// Resolve one battle from a config.
pub fn run_battle(config: &BattleConfig, rng: &mut SmallRng) -> Result<Outcome, ConfigError> {
    Ok(config.build()?.run(rng))
}

/// Resolve `num_battles` independent battles in parallel.
///
/// An invalid config fails the whole batch up front; a valid one cannot fail
/// mid-batch.
pub fn simulate_batch(
    config: &BattleConfig,
    num_battles: usize,
    seed: u64,
) -> Result<BatchResult, ConfigError> {
    let start = Instant::now();

    let outcomes: Vec<Outcome> = (0..num_battles)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            run_battle(config, &mut rng)
        })
        .collect::<Result<_, _>>()?;

    let elapsed = start.elapsed();

    let defender_wins = outcomes
        .iter()
        .filter(|o| o.winner == Winner::Defender)
        .count() as u64;
    let attacker_wins = num_battles as u64 - defender_wins;
    let defender_win_rate = if num_battles > 0 {
        defender_wins as f64 / num_battles as f64
    } else {
        0.0
    };
    let mean_rounds = if num_battles > 0 {
        outcomes.iter().map(|o| o.rounds as f64).sum::<f64>() / num_battles as f64
    } else {
        0.0
    };

    Ok(BatchResult {
        outcomes,
        defender_wins,
        attacker_wins,
        defender_win_rate,
        mean_rounds,
        elapsed,
    })
}
