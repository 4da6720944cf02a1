//! Test helper functions for building snapshots and driving battles.

use crate::battle::{Battle, BattleResult};
use crate::combatant::Controller;
use crate::element::Element;
use crate::event::TurnOutcome;
use crate::rng::FixedRolls;
use crate::skill::{SkillEffect, SkillId, SkillSpec};
use crate::snapshot::CombatantSnapshot;
use crate::status::StatusEffect;

/// Upper bound on advance calls when driving a battle to its end; generous
/// enough for every scenario in this suite, small enough to fail fast if
/// termination breaks.
pub const MAX_ADVANCES: usize = 10_000;

// =============================================================================
// Snapshot Factories
// =============================================================================

/// An elementless combatant snapshot with the given core stats.
pub fn fighter(name: &str, max_hp: i32, attack: i32, defense: i32, speed: i32) -> CombatantSnapshot {
    CombatantSnapshot {
        name: name.to_string(),
        controller: Controller::Ai,
        max_hp,
        attack,
        defense,
        speed,
        crit_rate: 0,
        elemental: [0; Element::COUNT],
        skills: Vec::new(),
    }
}

/// A fighter whose dominant element is `element` with the given value.
pub fn elemental_fighter(
    name: &str,
    element: Element,
    value: i32,
    max_hp: i32,
    attack: i32,
    defense: i32,
    speed: i32,
) -> CombatantSnapshot {
    let mut snap = fighter(name, max_hp, attack, defense, speed);
    snap.elemental[element.index()] = value;
    snap
}

/// Adds an attack skill to a snapshot.
pub fn with_attack_skill(
    mut snap: CombatantSnapshot,
    id: &str,
    multiplier: f64,
    cooldown: u32,
) -> CombatantSnapshot {
    snap.skills.push(SkillSpec {
        id: SkillId::new(id),
        name: id.to_string(),
        max_cooldown: cooldown,
        effect: SkillEffect::Attack { multiplier },
    });
    snap
}

/// Adds a heal skill to a snapshot.
pub fn with_heal_skill(
    mut snap: CombatantSnapshot,
    id: &str,
    fraction: f64,
    cooldown: u32,
) -> CombatantSnapshot {
    snap.skills.push(SkillSpec {
        id: SkillId::new(id),
        name: id.to_string(),
        max_cooldown: cooldown,
        effect: SkillEffect::Heal { fraction },
    });
    snap
}

/// Adds a buff skill carrying `effect` to a snapshot.
pub fn with_buff_skill(
    mut snap: CombatantSnapshot,
    id: &str,
    cooldown: u32,
    effect: StatusEffect,
) -> CombatantSnapshot {
    snap.skills.push(SkillSpec {
        id: SkillId::new(id),
        name: id.to_string(),
        max_cooldown: cooldown,
        effect: SkillEffect::Buff(effect),
    });
    snap
}

/// Adds a debuff skill carrying `effect` to a snapshot.
pub fn with_debuff_skill(
    mut snap: CombatantSnapshot,
    id: &str,
    cooldown: u32,
    effect: StatusEffect,
) -> CombatantSnapshot {
    snap.skills.push(SkillSpec {
        id: SkillId::new(id),
        name: id.to_string(),
        max_cooldown: cooldown,
        effect: SkillEffect::Debuff(effect),
    });
    snap
}

// =============================================================================
// Battle Drivers
// =============================================================================

/// A battle with variance pinned to 1.0 and crits disabled, so damage is
/// exactly the deterministic formula output.
pub fn pinned_battle(
    allies: &[CombatantSnapshot],
    enemies: &[CombatantSnapshot],
    turn_limit: u32,
) -> Battle {
    Battle::initialize(allies, enemies, turn_limit, Box::new(FixedRolls::neutral()))
        .expect("test battle setup must be valid")
}

/// Drives a battle to its terminal state, collecting every outcome.
///
/// Panics if the battle fails to terminate within [`MAX_ADVANCES`] calls.
pub fn run_to_end(battle: &mut Battle) -> (BattleResult, Vec<TurnOutcome>) {
    let mut outcomes = Vec::new();
    for _ in 0..MAX_ADVANCES {
        match battle.advance_turn() {
            Some(outcome) => outcomes.push(outcome),
            None => break,
        }
    }
    let result = battle
        .result()
        .expect("battle did not terminate within the advance budget");
    (result, outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fighter_factory_produces_valid_snapshots() {
        let snap = fighter("hero", 100, 20, 10, 8);
        assert_eq!(snap.clone().sanitized(), snap);
    }

    #[test]
    fn elemental_fighter_sets_one_value() {
        let snap = elemental_fighter("pyre", Element::Fire, 30, 100, 20, 10, 8);
        assert_eq!(snap.elemental, [30, 0, 0, 0]);
    }

    #[test]
    fn run_to_end_terminates_a_lopsided_battle() {
        let mut battle = pinned_battle(
            &[fighter("hero", 100, 50, 0, 9)],
            &[fighter("slime", 10, 1, 0, 1)],
            10,
        );
        let (result, outcomes) = run_to_end(&mut battle);
        assert_eq!(result, BattleResult::Victory);
        assert!(!outcomes.is_empty());
    }
}
