//! Pure damage and heal calculation.
//!
//! [`calculate_damage`] implements the three-branch elemental damage model.
//! With `m` the skill multiplier (1.0 for a basic attack), `atk`/`def` the
//! effective stats, and `elem` the attacker's dominant elemental value:
//!
//! - elementless attacker: `max(0, (atk - def) * m)`
//! - advantage:            `(elem + atk) * m` — defense bypassed entirely
//! - neutral:              `max(0, (elem / 2 + atk - def) * m)`
//! - disadvantage:         `max(0, (elem / 5 + atk - def) * m)`
//!
//! The `elem / 2` and `elem / 5` terms are integer divisions. The branch
//! result is then scaled by a uniform variance roll in `[0.9, 1.1]`, by 1.5
//! on a successful crit roll, and finally floored at 1: reaching the formula
//! always deals at least one point of damage.
//!
//! Heal amounts never route through this path; heal-category skills use
//! [`calculate_heal_amount`], which scales the *healer's* max HP.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::element::{Element, ElementRelation};
use crate::rng::RollSource;
use crate::skill::SkillEffect;

/// Result of one damage calculation, with the inputs event consumers want
/// to display alongside the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Final damage, always at least 1.
    pub amount: i32,
    /// The attacker's dominant element, `None` for an elementless attack.
    pub element: Option<Element>,
    /// Elemental relation used, `None` for an elementless attack.
    pub relation: Option<ElementRelation>,
    /// Whether the critical roll fired.
    pub crit: bool,
}

/// Computes damage for one attack or damage-skill use.
///
/// `multiplier` is the skill multiplier (1.0 for a basic attack). Buff,
/// debuff, and heal skills must not be routed through this function; the
/// orchestrator dispatches on skill category before calling it.
#[must_use]
pub fn calculate_damage(
    attacker: &Combatant,
    target: &Combatant,
    multiplier: f64,
    rolls: &mut dyn RollSource,
) -> DamageReport {
    let atk = f64::from(attacker.effective_attack());
    let def = f64::from(target.effective_defense());

    let (raw, element, relation) = match attacker.dominant_element() {
        None => ((atk - def).max(0.0) * multiplier, None, None),
        Some(element) => {
            let elem = attacker.effective_elemental(element);
            let relation = element.relation_to(target.dominant_element());
            let base = match relation {
                ElementRelation::Advantage => f64::from(elem) + atk,
                ElementRelation::Neutral => (f64::from(elem / 2) + atk - def).max(0.0),
                ElementRelation::Disadvantage => (f64::from(elem / 5) + atk - def).max(0.0),
            };
            (base * multiplier, Some(element), Some(relation))
        }
    };

    let mut scaled = raw * rolls.variance();
    let crit = rolls.crit(attacker.crit_rate());
    if crit {
        scaled *= 1.5;
    }

    DamageReport {
        amount: round_damage(scaled),
        element,
        relation,
        crit,
    }
}

/// Heal amount for a skill: `round(max_hp * fraction)` of the healer for a
/// heal-category skill, 0 for every other category.
#[must_use]
pub fn calculate_heal_amount(healer: &Combatant, skill: &SkillEffect) -> i32 {
    match skill {
        #[allow(clippy::cast_possible_truncation)]
        SkillEffect::Heal { fraction } => (f64::from(healer.max_hp()) * fraction).round() as i32,
        _ => 0,
    }
}

/// Rounds to the nearest integer and floors at the guaranteed minimum of 1.
#[allow(clippy::cast_possible_truncation)]
fn round_damage(value: f64) -> i32 {
    (value.round() as i32).max(1)
}
