//! Battle resolution: the round loop, dice comparison, and termination policy.
//!
//! A [`BattleEngine`] owns one attacker and one defender and drives rounds of
//! roll → compare → apply losses → check termination until one side is
//! eliminated. The engine holds no state beyond the two combatants; round
//! detail is observational only, delivered through an optional trace callback.
//!
//! Two policy details here are game-rule contracts, not incidental defaults:
//!
//! - On a compared position, the defender loses only when its die is strictly
//!   lower; exact ties cost the attacker the troop.
//! - Termination is evaluated Defender first, so a round that eliminates both
//!   sides resolves as a defender loss.

use rand::rngs::SmallRng;

use crate::combatant::{Combatant, Status};

/// Which side won the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Attacker,
    Defender,
}

/// Terminal result of one battle: the winner and its remaining troops.
/// `rounds` is the number of roll-compare-apply-check cycles it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Winner,
    pub troops_remaining: u32,
    pub rounds: u32,
}

/// Observational snapshot of one round, delivered to trace callbacks.
/// Troop counts are post-loss for the round.
#[derive(Debug, Clone)]
pub struct RoundTrace {
    pub round: u32,
    pub attacker_roll: Vec<u32>,
    pub defender_roll: Vec<u32>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub attacker_troops: u32,
    pub defender_troops: u32,
}

/// Pair two descending rolls position-by-position and count losses.
///
/// Only the first `min(len, len)` positions are compared; the leftover dice of
/// the longer roll produce no loss. Each compared position costs exactly one
/// side one troop: the defender when its die is strictly lower, the attacker
/// otherwise (ties included). Returns `(attacker_losses, defender_losses)`.
pub fn compare_rolls(attacker_roll: &[u32], defender_roll: &[u32]) -> (u32, u32) {
    let mut attacker_losses = 0;
    let mut defender_losses = 0;
    for (att, def) in attacker_roll.iter().zip(defender_roll.iter()) {
        if def < att {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }
    (attacker_losses, defender_losses)
}

/// The ordered termination check: Defender first, then Attacker.
///
/// Checking the defender first means a round whose losses eliminate both
/// sides reports the attacker as winner. Exposed as a standalone function so
/// the ordering is directly testable.
pub fn evaluate_termination(attacker: &Combatant, defender: &Combatant) -> Option<Winner> {
    if defender.check_terminal() == Status::Eliminated {
        return Some(Winner::Attacker);
    }
    if attacker.check_terminal() == Status::Eliminated {
        return Some(Winner::Defender);
    }
    None
}

/// Drives one battle between a fixed attacker/defender pair.
pub struct BattleEngine {
    attacker: Combatant,
    defender: Combatant,
}

impl BattleEngine {
    /// Pair two already-validated combatants. The pairing is fixed for the
    /// lifetime of the battle.
    pub fn new(attacker: Combatant, defender: Combatant) -> Self {
        Self { attacker, defender }
    }

    /// Resolve the battle. Consumes the engine: one battle per engine, no
    /// state survives the call.
    ///
    /// Always terminates: both termination checks passing guarantees at least
    /// one die on each side next round, so every round compares at least one
    /// pair and assigns at least one loss.
    pub fn run(self, rng: &mut SmallRng) -> Outcome {
        self.run_traced(rng, |_| {})
    }

    /// Resolve the battle, invoking `on_round` after each round's losses are
    /// applied. The callback observes; it cannot affect the outcome.
    pub fn run_traced(mut self, rng: &mut SmallRng, mut on_round: impl FnMut(&RoundTrace)) -> Outcome {
        let mut round = 0;
        loop {
            round += 1;

            let attacker_roll = self.attacker.roll_dice(rng);
            let defender_roll = self.defender.roll_dice(rng);
            let (attacker_losses, defender_losses) = compare_rolls(&attacker_roll, &defender_roll);

            self.defender.apply_losses(defender_losses);
            self.attacker.apply_losses(attacker_losses);
            self.defender.recompute_dice_count();
            self.attacker.recompute_dice_count();

            on_round(&RoundTrace {
                round,
                attacker_roll,
                defender_roll,
                attacker_losses,
                defender_losses,
                attacker_troops: self.attacker.troops(),
                defender_troops: self.defender.troops(),
            });

            if let Some(winner) = evaluate_termination(&self.attacker, &self.defender) {
                let troops_remaining = match winner {
                    Winner::Attacker => self.attacker.troops(),
                    Winner::Defender => self.defender.troops(),
                };
                return Outcome {
                    winner,
                    troops_remaining,
                    rounds: round,
                };
            }
        }
    }
}
