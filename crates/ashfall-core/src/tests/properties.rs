//! Property tests for the numeric invariants of the core.

use proptest::prelude::*;

use crate::combatant::{Combatant, CombatantId, Controller, Team};
use crate::damage::calculate_damage;
use crate::rng::FixedRolls;
use crate::snapshot::CombatantSnapshot;
use crate::status::{StatusEffect, StatusKind};

fn make(max_hp: i32, attack: i32, defense: i32, elemental: [i32; 4]) -> Combatant {
    let snap = CombatantSnapshot {
        name: "prop".to_string(),
        controller: Controller::Ai,
        max_hp,
        attack,
        defense,
        speed: 5,
        crit_rate: 0,
        elemental,
        skills: Vec::new(),
    };
    Combatant::from_snapshot(CombatantId::new(0), Team::Ally, 0, &snap)
}

proptest! {
    /// After any sequence of damage and heal operations, HP stays inside
    /// `[0, max_hp]` and the alive flag tracks `hp > 0` exactly.
    #[test]
    fn hp_invariants_hold_under_any_mutation_sequence(
        max_hp in 1..500i32,
        ops in proptest::collection::vec((any::<bool>(), -100..400i32), 0..60),
    ) {
        let mut c = make(max_hp, 10, 10, [0; 4]);
        for (is_damage, amount) in ops {
            if is_damage {
                c.take_damage(amount);
            } else {
                c.heal(amount);
            }
            prop_assert!((0..=max_hp).contains(&c.hp()));
            prop_assert_eq!(c.is_alive(), c.hp() > 0);
        }
    }

    /// Elemental-advantage damage bypasses defense entirely: any two
    /// defense values produce the same number.
    #[test]
    fn advantage_damage_ignores_defense(
        elem in 1..300i32,
        attack in 0..300i32,
        def_a in 0..1000i32,
        def_b in 0..1000i32,
    ) {
        let attacker = make(100, attack, 0, [elem, 0, 0, 0]);
        let target_a = make(100, 0, def_a, [0, 0, 10, 0]); // wind
        let target_b = make(100, 0, def_b, [0, 0, 10, 0]);
        let mut rolls = FixedRolls::neutral();

        let a = calculate_damage(&attacker, &target_a, 1.0, &mut rolls).amount;
        let b = calculate_damage(&attacker, &target_b, 1.0, &mut rolls).amount;
        prop_assert_eq!(a, b);
        prop_assert_eq!(a, (elem + attack).max(1));
    }

    /// Neutral-relation damage never increases when the target's defense
    /// grows, all else fixed.
    #[test]
    fn neutral_damage_is_monotone_in_defense(
        elem in 0..300i32,
        attack in 0..300i32,
        defense in 0..500i32,
        delta in 0..500i32,
    ) {
        let attacker = make(100, attack, 0, [elem, 0, 0, 0]);
        let softer = make(100, 0, defense, [0, 0, 0, 10]); // earth: neutral vs fire
        let harder = make(100, 0, defense + delta, [0, 0, 0, 10]);
        let mut rolls = FixedRolls::neutral();

        let soft = calculate_damage(&attacker, &softer, 1.0, &mut rolls).amount;
        let hard = calculate_damage(&attacker, &harder, 1.0, &mut rolls).amount;
        prop_assert!(hard <= soft);
    }

    /// Disadvantage-relation damage is likewise monotone non-increasing in
    /// defense.
    #[test]
    fn disadvantage_damage_is_monotone_in_defense(
        elem in 1..300i32,
        attack in 0..300i32,
        defense in 0..500i32,
        delta in 0..500i32,
    ) {
        let attacker = make(100, attack, 0, [elem, 0, 0, 0]);
        let softer = make(100, 0, defense, [0, 10, 0, 0]); // water beats fire
        let harder = make(100, 0, defense + delta, [0, 10, 0, 0]);
        let mut rolls = FixedRolls::neutral();

        let soft = calculate_damage(&attacker, &softer, 1.0, &mut rolls).amount;
        let hard = calculate_damage(&attacker, &harder, 1.0, &mut rolls).amount;
        prop_assert!(hard <= soft);
    }

    /// The formula path always lands at least one point of damage.
    #[test]
    fn damage_is_always_at_least_one(
        attack in 0..200i32,
        defense in 0..2000i32,
        elemental in proptest::array::uniform4(0..200i32),
        target_elemental in proptest::array::uniform4(0..200i32),
        multiplier in 0.1..4.0f64,
    ) {
        let attacker = make(100, attack, 0, elemental);
        let target = make(100, 0, defense, target_elemental);
        let mut rolls = FixedRolls::neutral();

        let amount = calculate_damage(&attacker, &target, multiplier, &mut rolls).amount;
        prop_assert!(amount >= 1);
    }

    /// Applying the same effect id twice leaves exactly one instance
    /// carrying the second application's values.
    #[test]
    fn status_reapplication_replaces_instead_of_stacking(
        add_a in -50..50i32,
        add_b in -50..50i32,
        turns_a in 1..10u32,
        turns_b in 1..10u32,
    ) {
        let mut c = make(100, 20, 10, [0; 4]);

        let mut first = StatusEffect::new("mark", "Mark", StatusKind::Debuff, turns_a);
        first.attack_add = add_a;
        let mut second = StatusEffect::new("mark", "Mark", StatusKind::Debuff, turns_b);
        second.attack_add = add_b;

        c.apply_status(first);
        c.apply_status(second);

        prop_assert_eq!(c.statuses().len(), 1);
        prop_assert_eq!(c.statuses()[0].attack_add, add_b);
        prop_assert_eq!(c.statuses()[0].turns, turns_b);
        // Idempotent under further identical applications.
        let mut third = StatusEffect::new("mark", "Mark", StatusKind::Debuff, turns_b);
        third.attack_add = add_b;
        c.apply_status(third);
        prop_assert_eq!(c.statuses().len(), 1);
    }

    /// Effective stats fold additively then multiplicatively and never go
    /// negative.
    #[test]
    fn effective_stats_are_non_negative(
        base in 0..200i32,
        add in -300..300i32,
        mul in 0.0..3.0f64,
    ) {
        let mut c = make(100, base, base, [0; 4]);
        let mut effect = StatusEffect::new("warp", "Warp", StatusKind::Debuff, 3);
        effect.attack_add = add;
        effect.attack_mul = mul;
        effect.defense_add = add;
        effect.defense_mul = mul;
        c.apply_status(effect);

        prop_assert!(c.effective_attack() >= 0);
        prop_assert!(c.effective_defense() >= 0);
    }
}
