//! Statistics aggregation from battle outcomes.
//!
//! Reduces a batch of [`Outcome`]s into win rates, a rounds distribution, and
//! winner troop summaries, serializable to JSON for offline analysis.

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::battle::{Outcome, Winner};

use super::engine::BattleConfig;

/// Aggregate statistics for one batch of battles.
#[derive(Serialize)]
pub struct BatchStatistics {
    pub num_battles: u64,
    pub seed: u64,
    pub config: BattleConfig,
    pub defender_wins: u64,
    pub attacker_wins: u64,
    pub defender_win_rate: f64,
    pub attacker_win_rate: f64,
    pub rounds: RoundsDistribution,
    /// Mean remaining troops of the attacker across battles it won.
    pub mean_attacker_troops_when_winning: f64,
    /// Mean remaining troops of the defender across battles it won.
    pub mean_defender_troops_when_winning: f64,
}

/// Distribution of battle lengths in rounds.
#[derive(Serialize)]
pub struct RoundsDistribution {
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    pub median: u32,
}

/// Reduce a batch of outcomes into [`BatchStatistics`].
pub fn aggregate_statistics(config: &BattleConfig, outcomes: &[Outcome], seed: u64) -> BatchStatistics {
    let n = outcomes.len() as u64;

    let mut defender_wins = 0u64;
    let mut attacker_troop_sum = 0u64;
    let mut defender_troop_sum = 0u64;
    for o in outcomes {
        match o.winner {
            Winner::Defender => {
                defender_wins += 1;
                defender_troop_sum += o.troops_remaining as u64;
            }
            Winner::Attacker => {
                attacker_troop_sum += o.troops_remaining as u64;
            }
        }
    }
    let attacker_wins = n - defender_wins;

    let mut rounds: Vec<u32> = outcomes.iter().map(|o| o.rounds).collect();
    rounds.sort_unstable();
    let rounds_dist = RoundsDistribution {
        mean: if n > 0 {
            rounds.iter().map(|&r| r as f64).sum::<f64>() / n as f64
        } else {
            0.0
        },
        min: rounds.first().copied().unwrap_or(0),
        max: rounds.last().copied().unwrap_or(0),
        median: rounds.get(rounds.len() / 2).copied().unwrap_or(0),
    };

    let mean_of = |sum: u64, count: u64| if count > 0 { sum as f64 / count as f64 } else { 0.0 };

    BatchStatistics {
        num_battles: n,
        seed,
        config: *config,
        defender_wins,
        attacker_wins,
        defender_win_rate: mean_of(defender_wins, n),
        attacker_win_rate: mean_of(attacker_wins, n),
        rounds: rounds_dist,
        mean_attacker_troops_when_winning: mean_of(attacker_troop_sum, attacker_wins),
        mean_defender_troops_when_winning: mean_of(defender_troop_sum, defender_wins),
    }
}

/// Write statistics as pretty-printed JSON.
pub fn save_statistics(path: &Path, stats: &BatchStatistics) -> std::io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, stats)?;
    Ok(())
}
