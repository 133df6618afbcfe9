//! Property-based tests for the battle rules.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use conquest::battle::{compare_rolls, BattleEngine, Winner};
use conquest::combatant::Combatant;
use conquest::dice_mechanics::roll_sorted_desc;

/// Strategy: a descending roll of 0-3 dice, as a combatant would produce.
fn roll_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1..=6u32, 0..=3).prop_map(|mut v| {
        v.sort_unstable_by(|a, b| b.cmp(a));
        v
    })
}

proptest! {
    // 1. Fresh construction derives the dice count from the role formula.
    #[test]
    fn fresh_dice_counts_match_formulas(troops in 1..100u32, max_dice in 1..6u32) {
        let defender = Combatant::defender(troops, max_dice).unwrap();
        prop_assert_eq!(defender.dice_count(), troops.min(max_dice));

        if troops > 1 {
            let attacker = Combatant::attacker(troops, max_dice).unwrap();
            prop_assert_eq!(attacker.dice_count(), (troops - 1).min(max_dice));
        }
    }

    // 2. Rolls have the right length, stay in [1,6], and are descending.
    #[test]
    fn rolls_are_descending_and_in_range(count in 0..6u32, seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let roll = roll_sorted_desc(count, &mut rng);
        prop_assert_eq!(roll.len(), count as usize);
        for &d in &roll {
            prop_assert!((1..=6).contains(&d));
        }
        for w in roll.windows(2) {
            prop_assert!(w[0] >= w[1], "ascending pair in {:?}", roll);
        }
    }

    // 3. Loss conservation: every compared pair costs exactly one side one
    //    troop, and nothing beyond min(len, len) is compared.
    #[test]
    fn losses_sum_to_compared_pairs(att in roll_strategy(), def in roll_strategy()) {
        let (attacker_losses, defender_losses) = compare_rolls(&att, &def);
        let compared = att.len().min(def.len()) as u32;
        prop_assert_eq!(attacker_losses + defender_losses, compared);
    }

    // 4. Tie law: a tied position never costs the defender a troop.
    #[test]
    fn ties_cost_the_attacker(roll in roll_strategy()) {
        let (attacker_losses, defender_losses) = compare_rolls(&roll, &roll);
        prop_assert_eq!(attacker_losses, roll.len() as u32);
        prop_assert_eq!(defender_losses, 0);
    }

    // 5. Every valid configuration terminates with a coherent outcome, and
    //    troop counts never increase along the way.
    #[test]
    fn battles_terminate_with_coherent_outcomes(
        attacker_troops in 2..15u32,
        defender_troops in 1..15u32,
        attacker_max_dice in 1..4u32,
        defender_max_dice in 1..3u32,
        seed in any::<u64>(),
    ) {
        let engine = BattleEngine::new(
            Combatant::attacker(attacker_troops, attacker_max_dice).unwrap(),
            Combatant::defender(defender_troops, defender_max_dice).unwrap(),
        );
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut prev_att = attacker_troops;
        let mut prev_def = defender_troops;
        let mut rounds_seen = 0;
        let outcome = engine.run_traced(&mut rng, |trace| {
            rounds_seen += 1;
            assert_eq!(trace.round, rounds_seen);
            assert!(trace.attacker_troops <= prev_att);
            assert!(trace.defender_troops <= prev_def);
            // Strict progress: at least one loss per round.
            assert!(trace.attacker_losses + trace.defender_losses >= 1);
            prev_att = trace.attacker_troops;
            prev_def = trace.defender_troops;
        });

        prop_assert_eq!(outcome.rounds, rounds_seen);
        match outcome.winner {
            Winner::Attacker => {
                prop_assert_eq!(prev_def, 0);
                prop_assert_eq!(outcome.troops_remaining, prev_att);
                prop_assert!(outcome.troops_remaining >= 2);
            }
            Winner::Defender => {
                prop_assert_eq!(prev_att, 1);
                prop_assert_eq!(outcome.troops_remaining, prev_def);
                prop_assert!(outcome.troops_remaining >= 1);
            }
        }
    }

    // 6. The attacker never rolls more dice than troops - 1, no matter how
    //    the battle has gone so far.
    #[test]
    fn attacker_leaves_one_behind_throughout(
        attacker_troops in 2..12u32,
        defender_troops in 1..12u32,
        seed in any::<u64>(),
    ) {
        let engine = BattleEngine::new(
            Combatant::attacker(attacker_troops, 3).unwrap(),
            Combatant::defender(defender_troops, 2).unwrap(),
        );
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut att_before = attacker_troops;
        engine.run_traced(&mut rng, |trace| {
            assert!(
                (trace.attacker_roll.len() as u32) <= att_before.saturating_sub(1),
                "attacker rolled {} dice with {} troops",
                trace.attacker_roll.len(),
                att_before
            );
            att_before = trace.attacker_troops;
        });
    }
}
