//! Monte Carlo simulation and statistics.
//!
//! - [`engine`]: run N independent battles in parallel from one config
//! - [`statistics`]: aggregate win rates and distributions, JSON output
//! - [`sweep`]: win-rate curves over troop ranges and dice-ceiling pairs

pub mod engine;
pub mod statistics;
pub mod sweep;

pub use engine::{run_battle, simulate_batch, BatchResult, BattleConfig};
pub use statistics::{aggregate_statistics, save_statistics, BatchStatistics};
pub use sweep::{dice_sweep, equal_sweep, fixed_sweep, DicePair, FixedSide, SweepPoint, SweepSeries, DICE_PAIR_GRID};
