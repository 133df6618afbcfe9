//! Configuration errors surfaced at combatant construction.
//!
//! Construction is the only recoverable failure point: once two valid
//! combatants are paired, a battle run is total and always produces an
//! outcome. Internal precondition violations (losing more troops than a side
//! holds) are engine bugs and panic instead of returning a variant here.

use thiserror::Error;

use crate::combatant::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Troop count incompatible with the role's rules: zero troops for either
    /// side, or a one-troop attacker (the leave-one-behind rule leaves it
    /// nothing to roll with).
    #[error("{role:?} cannot fight with {troops} troops")]
    InvalidTroops { role: Role, troops: u32 },

    /// A dice ceiling of zero would mean rolling no dice every round.
    #[error("max_dice must be at least 1, got {max_dice}")]
    InvalidMaxDice { max_dice: u32 },
}
