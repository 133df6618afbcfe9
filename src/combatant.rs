//! Combatant state and per-role rules.
//!
//! Exactly two roles exist and neither will be extended, so the role-specific
//! formulas live on a closed [`Role`] enum rather than behind a trait. A
//! [`Combatant`] owns one side's troop count and derived dice count; the dice
//! count is never fixed for a whole battle — a shrinking garrison forces fewer
//! dice on later rounds, so it is recomputed after every loss application.

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::dice_mechanics::roll_sorted_desc;
use crate::error::ConfigError;

/// Which side of the battle a combatant fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    /// Dice this role may roll at the given troop count, before the ceiling.
    ///
    /// The attacker always keeps one troop behind (leave-one-behind rule), so
    /// its dice derive from `troops - 1`.
    fn raw_dice(self, troops: u32) -> u32 {
        match self {
            Role::Attacker => troops.saturating_sub(1),
            Role::Defender => troops,
        }
    }

    /// Terminal troop count: the defender is eliminated at 0, the attacker at
    /// 1 (no force left that can attack).
    fn terminal_troops(self) -> u32 {
        match self {
            Role::Attacker => 1,
            Role::Defender => 0,
        }
    }

    /// Smallest troop count this role can be constructed with.
    fn min_troops(self) -> u32 {
        self.terminal_troops() + 1
    }
}

/// Result of a termination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Eliminated,
}

/// One side of a single battle: troop count plus derived dice count.
///
/// Constructed once per battle and consumed by it; never reused. `troops` only
/// decreases (loss application), and `dice_count` always equals the role
/// formula applied to the current `troops`, clamped to `max_dice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    role: Role,
    troops: u32,
    max_dice: u32,
    dice_count: u32,
}

impl Combatant {
    /// Construct a combatant, rejecting degenerate configurations: zero
    /// troops, a one-troop attacker, or a zero dice ceiling.
    pub fn new(role: Role, troops: u32, max_dice: u32) -> Result<Self, ConfigError> {
        if max_dice == 0 {
            return Err(ConfigError::InvalidMaxDice { max_dice });
        }
        if troops < role.min_troops() {
            return Err(ConfigError::InvalidTroops { role, troops });
        }
        let mut combatant = Self {
            role,
            troops,
            max_dice,
            dice_count: 0,
        };
        combatant.recompute_dice_count();
        Ok(combatant)
    }

    /// Construct an attacker. Requires `troops >= 2`.
    pub fn attacker(troops: u32, max_dice: u32) -> Result<Self, ConfigError> {
        Self::new(Role::Attacker, troops, max_dice)
    }

    /// Construct a defender. Requires `troops >= 1`.
    pub fn defender(troops: u32, max_dice: u32) -> Result<Self, ConfigError> {
        Self::new(Role::Defender, troops, max_dice)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn troops(&self) -> u32 {
        self.troops
    }

    pub fn max_dice(&self) -> u32 {
        self.max_dice
    }

    /// Dice this side rolls in the current round.
    pub fn dice_count(&self) -> u32 {
        self.dice_count
    }

    /// Roll this side's dice for one round: `dice_count` uniform draws in
    /// [1,6], sorted descending. The roll is returned by value and passed
    /// explicitly into the comparison step; nothing is stored.
    pub fn roll_dice(&self, rng: &mut SmallRng) -> Vec<u32> {
        roll_sorted_desc(self.dice_count, rng)
    }

    /// Remove `n` troops. The engine never requests more losses than compared
    /// die pairs, which is bounded by this side's dice count, so `n > troops`
    /// indicates an engine bug and is fatal.
    pub fn apply_losses(&mut self, n: u32) {
        assert!(
            n <= self.troops,
            "{:?} asked to lose {} troops but only has {}",
            self.role,
            n,
            self.troops
        );
        self.troops -= n;
    }

    /// Reapply the role's dice formula against the current troop count.
    /// Must run after every [`apply_losses`](Self::apply_losses), before the
    /// next round's roll.
    pub fn recompute_dice_count(&mut self) {
        self.dice_count = self.role.raw_dice(self.troops).min(self.max_dice);
    }

    /// Evaluate this side's termination predicate against the post-loss troop
    /// count. Elimination is a function of troops, not dice count.
    pub fn check_terminal(&self) -> Status {
        if self.troops == self.role.terminal_troops() {
            Status::Eliminated
        } else {
            Status::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_defender_dice_count_formula() {
        for troops in 1..10 {
            for max_dice in 1..4 {
                let d = Combatant::defender(troops, max_dice).unwrap();
                assert_eq!(d.dice_count(), troops.min(max_dice));
            }
        }
    }

    #[test]
    fn test_attacker_dice_count_formula() {
        for troops in 2..10 {
            for max_dice in 1..4 {
                let a = Combatant::attacker(troops, max_dice).unwrap();
                assert_eq!(a.dice_count(), (troops - 1).min(max_dice));
            }
        }
    }

    #[test]
    fn test_rejects_zero_troops() {
        assert_eq!(
            Combatant::defender(0, 2),
            Err(ConfigError::InvalidTroops {
                role: Role::Defender,
                troops: 0
            })
        );
    }

    #[test]
    fn test_rejects_one_troop_attacker() {
        assert_eq!(
            Combatant::attacker(1, 3),
            Err(ConfigError::InvalidTroops {
                role: Role::Attacker,
                troops: 1
            })
        );
    }

    #[test]
    fn test_rejects_zero_max_dice() {
        assert_eq!(
            Combatant::attacker(5, 0),
            Err(ConfigError::InvalidMaxDice { max_dice: 0 })
        );
        assert_eq!(
            Combatant::defender(5, 0),
            Err(ConfigError::InvalidMaxDice { max_dice: 0 })
        );
    }

    #[test]
    fn test_roll_matches_dice_count() {
        let mut rng = SmallRng::seed_from_u64(42);
        let d = Combatant::defender(5, 2).unwrap();
        assert_eq!(d.roll_dice(&mut rng).len(), 2);
        let a = Combatant::attacker(2, 3).unwrap();
        assert_eq!(a.roll_dice(&mut rng).len(), 1);
    }

    #[test]
    fn test_losses_shrink_dice_count() {
        let mut d = Combatant::defender(3, 2).unwrap();
        assert_eq!(d.dice_count(), 2);
        d.apply_losses(2);
        d.recompute_dice_count();
        assert_eq!(d.troops(), 1);
        assert_eq!(d.dice_count(), 1);
        assert_eq!(d.check_terminal(), Status::Ongoing);

        let mut a = Combatant::attacker(4, 3).unwrap();
        assert_eq!(a.dice_count(), 3);
        a.apply_losses(2);
        a.recompute_dice_count();
        assert_eq!(a.troops(), 2);
        assert_eq!(a.dice_count(), 1);
        assert_eq!(a.check_terminal(), Status::Ongoing);
    }

    #[test]
    fn test_terminal_predicates() {
        let mut d = Combatant::defender(1, 2).unwrap();
        d.apply_losses(1);
        d.recompute_dice_count();
        assert_eq!(d.check_terminal(), Status::Eliminated);

        let mut a = Combatant::attacker(2, 3).unwrap();
        a.apply_losses(1);
        a.recompute_dice_count();
        assert_eq!(a.check_terminal(), Status::Eliminated);
    }

    #[test]
    #[should_panic(expected = "asked to lose")]
    fn test_overdraw_losses_is_fatal() {
        let mut d = Combatant::defender(2, 2).unwrap();
        d.apply_losses(3);
    }
}
