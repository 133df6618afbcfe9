//! Die rolling: uniform draws sorted descending.
//!
//! All randomness in a battle flows through [`roll_sorted_desc`]; the rest of
//! the engine is deterministic given the rolls.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::DIE_FACES;

/// Roll `count` fair dice and return them sorted descending.
///
/// Descending order is what the comparison step pairs on: highest die against
/// highest die. `count == 0` returns an empty roll.
pub fn roll_sorted_desc(count: u32, rng: &mut SmallRng) -> Vec<u32> {
    let mut rolls: Vec<u32> = (0..count).map(|_| rng.random_range(1..=DIE_FACES)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}
