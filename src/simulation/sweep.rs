//! Win-rate sweeps over troop ranges and dice-ceiling pairs.
//!
//! Three sweep shapes, matching the classic questions asked of this matchup:
//!
//! - [`equal_sweep`]: equal troop counts on both sides, swept over a range
//! - [`fixed_sweep`]: one side fixed, the other swept
//! - [`dice_sweep`]: either of the above repeated for every dice pair in the
//!   {1,2} defender × {1,2,3} attacker grid
//!
//! Each point is an independent batch; its seed derives from the sweep seed
//! and the troop count so curves are reproducible point-by-point. Points
//! whose configuration fails validation (an attacker below two troops, say)
//! are skipped rather than failing the sweep.

use super::engine::{simulate_batch, BattleConfig};

/// A (defender, attacker) dice-ceiling pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DicePair {
    pub defender: u32,
    pub attacker: u32,
}

impl DicePair {
    /// Short series label, e.g. `d2a3` for defender ceiling 2, attacker 3.
    pub fn label(&self) -> String {
        format!("d{}a{}", self.defender, self.attacker)
    }
}

/// The canonical ceiling grid: defender {1,2} × attacker {1,2,3}.
pub const DICE_PAIR_GRID: &[DicePair] = &[
    DicePair { defender: 1, attacker: 1 },
    DicePair { defender: 1, attacker: 2 },
    DicePair { defender: 1, attacker: 3 },
    DicePair { defender: 2, attacker: 1 },
    DicePair { defender: 2, attacker: 2 },
    DicePair { defender: 2, attacker: 3 },
];

/// One point on a win-rate curve.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    /// The swept troop count (both sides for an equal sweep, the varying side
    /// for a fixed sweep).
    pub troops: u32,
    pub defender_win_rate: f64,
    pub trials: usize,
}

/// A win-rate curve for one dice pair.
#[derive(Debug, Clone)]
pub struct SweepSeries {
    pub dice: DicePair,
    pub points: Vec<SweepPoint>,
}

/// Which side stays fixed in a [`fixed_sweep`].
#[derive(Debug, Clone, Copy)]
pub enum FixedSide {
    Defender(u32),
    Attacker(u32),
}

/// Per-point seed: decorrelate points without losing reproducibility.
fn point_seed(seed: u64, troops: u32) -> u64 {
    seed.wrapping_add((troops as u64).wrapping_mul(0x9e3779b97f4a7c15))
}

fn sweep_over(
    dice: DicePair,
    troop_range: impl Iterator<Item = u32>,
    trials: usize,
    seed: u64,
    config_for: impl Fn(u32) -> BattleConfig,
) -> SweepSeries {
    let mut points = Vec::new();
    for troops in troop_range {
        let config = config_for(troops).with_max_dice(dice.defender, dice.attacker);
        // Skip configs that cannot fight (spec'd sweep policy: report what
        // runs, never crash the whole sweep).
        let result = match simulate_batch(&config, trials, point_seed(seed, troops)) {
            Ok(r) => r,
            Err(_) => continue,
        };
        points.push(SweepPoint {
            troops,
            defender_win_rate: result.defender_win_rate,
            trials,
        });
    }
    SweepSeries { dice, points }
}

/// Equal troop counts on both sides, swept over `lo..=hi`.
pub fn equal_sweep(lo: u32, hi: u32, trials: usize, dice: DicePair, seed: u64) -> SweepSeries {
    sweep_over(dice, lo..=hi, trials, seed, |troops| {
        BattleConfig::new(troops, troops)
    })
}

/// One side fixed, the other swept over `lo..=hi`.
pub fn fixed_sweep(
    fixed: FixedSide,
    lo: u32,
    hi: u32,
    trials: usize,
    dice: DicePair,
    seed: u64,
) -> SweepSeries {
    sweep_over(dice, lo..=hi, trials, seed, |troops| match fixed {
        FixedSide::Defender(def) => BattleConfig::new(troops, def),
        FixedSide::Attacker(att) => BattleConfig::new(att, troops),
    })
}

/// Run one sweep shape for every dice pair in [`DICE_PAIR_GRID`].
pub fn dice_sweep(
    fixed: Option<FixedSide>,
    lo: u32,
    hi: u32,
    trials: usize,
    seed: u64,
) -> Vec<SweepSeries> {
    DICE_PAIR_GRID
        .iter()
        .map(|&dice| match fixed {
            Some(side) => fixed_sweep(side, lo, hi, trials, dice, seed),
            None => equal_sweep(lo, hi, trials, dice, seed),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_sweep_covers_range() {
        let series = equal_sweep(2, 6, 100, DicePair { defender: 2, attacker: 3 }, 42);
        let troops: Vec<u32> = series.points.iter().map(|p| p.troops).collect();
        assert_eq!(troops, vec![2, 3, 4, 5, 6]);
        for p in &series.points {
            assert!((0.0..=1.0).contains(&p.defender_win_rate));
            assert_eq!(p.trials, 100);
        }
    }

    #[test]
    fn test_fixed_sweep_skips_unfightable_attackers() {
        // Sweeping the attacker from 1 skips the one-troop point.
        let series = fixed_sweep(
            FixedSide::Defender(3),
            1,
            4,
            50,
            DicePair { defender: 2, attacker: 3 },
            42,
        );
        let troops: Vec<u32> = series.points.iter().map(|p| p.troops).collect();
        assert_eq!(troops, vec![2, 3, 4]);
    }

    #[test]
    fn test_fixed_defender_sweep_keeps_all_points() {
        // Sweeping the defender from 1 is always valid.
        let series = fixed_sweep(
            FixedSide::Attacker(5),
            1,
            4,
            50,
            DicePair { defender: 2, attacker: 3 },
            42,
        );
        let troops: Vec<u32> = series.points.iter().map(|p| p.troops).collect();
        assert_eq!(troops, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_dice_sweep_produces_all_six_series() {
        let all = dice_sweep(None, 2, 3, 20, 42);
        assert_eq!(all.len(), 6);
        let labels: Vec<String> = all.iter().map(|s| s.dice.label()).collect();
        assert_eq!(labels, vec!["d1a1", "d1a2", "d1a3", "d2a1", "d2a2", "d2a3"]);
    }

    #[test]
    fn test_more_attacker_dice_help_the_attacker() {
        // At equal troops, the defender should fare worse against a 3-die
        // ceiling than against a 1-die ceiling.
        let weak = equal_sweep(8, 8, 2000, DicePair { defender: 2, attacker: 1 }, 42);
        let strong = equal_sweep(8, 8, 2000, DicePair { defender: 2, attacker: 3 }, 42);
        assert!(
            strong.points[0].defender_win_rate < weak.points[0].defender_win_rate,
            "d2a3 {} should be below d2a1 {}",
            strong.points[0].defender_win_rate,
            weak.points[0].defender_win_rate
        );
    }

    #[test]
    fn test_sweep_deterministic_for_seed() {
        let dice = DicePair { defender: 2, attacker: 3 };
        let a = equal_sweep(2, 5, 200, dice, 9);
        let b = equal_sweep(2, 5, 200, dice, 9);
        for (pa, pb) in a.points.iter().zip(b.points.iter()) {
            assert_eq!(pa.defender_win_rate, pb.defender_win_rate);
        }
    }
}
