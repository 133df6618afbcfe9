//! Game-rule constants shared across the crate.

/// Number of faces on a die. Rolls are uniform over [1, DIE_FACES].
pub const DIE_FACES: u32 = 6;

/// Conventional dice ceiling for a defending territory.
pub const DEFAULT_DEFENDER_MAX_DICE: u32 = 2;

/// Conventional dice ceiling for an attacking force.
pub const DEFAULT_ATTACKER_MAX_DICE: u32 = 3;

/// Default troop range swept by the sweep binary: 2..=29.
/// The lower bound is the smallest attacker that can fight at all.
pub const SWEEP_TROOPS_MIN: u32 = 2;
pub const SWEEP_TROOPS_MAX: u32 = 29;
