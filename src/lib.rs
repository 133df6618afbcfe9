//! # Conquest — Risk-style battle resolver and win-rate simulator
//!
//! Resolves single territorial combats under classic Risk dice rules and
//! aggregates outcomes over large trial counts to estimate win probabilities.
//!
//! ## Battle rules
//!
//! Each round both sides roll up to their dice ceiling (Defender 2, Attacker 3
//! by convention), the rolls are sorted descending and paired position-by-
//! position for `min(attacker_dice, defender_dice)` positions. A position where
//! the defender's die is strictly lower costs the defender one troop; any other
//! position (exact ties included) costs the attacker one troop. Dice counts are
//! recomputed from the shrinking troop counts after every round, with the
//! attacker always leaving one troop behind. The battle ends when the defender
//! reaches 0 troops or the attacker reaches 1.
//!
//! | Concern | Module |
//! |---------|--------|
//! | Combatant state and per-role rules | [`combatant`] |
//! | Die rolling | [`dice_mechanics`] |
//! | Round loop, comparison, termination | [`battle`] |
//! | Monte Carlo batches, statistics, parameter sweeps | [`simulation`] |
//!
//! Single battles are synchronous and share nothing; the batch layer in
//! [`simulation::engine`] runs trials in parallel with one seeded RNG per
//! trial.

pub mod battle;
pub mod combatant;
pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod error;
pub mod simulation;
