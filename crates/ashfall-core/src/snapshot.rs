//! Stat snapshots and the roster provider seam.
//!
//! The core never reads equipment, enhancement, or monster master data
//! directly. Collaborators that own those systems implement
//! [`RosterProvider`] (a typed trait, not reflection or a global data
//! manager) and hand the core plain [`CombatantSnapshot`] values at battle
//! initialization.
//!
//! # Degraded data
//!
//! Snapshots from external systems are sanitized at the boundary rather than
//! rejected: a battle must never abort mid-setup over a bad stat row. Each
//! degradation is logged as a `tracing` warning and replaced with the safest
//! numeric default (zero bonus, basic-attack behavior). See
//! [`CombatantSnapshot::sanitized`] for the exact rules.

use serde::{Deserialize, Serialize};

use crate::combatant::Controller;
use crate::element::Element;
use crate::skill::{SkillEffect, SkillSpec, MAX_SKILL_SLOTS};

/// Initial stats and skills for one combatant, as supplied by an external
/// stat-snapshot provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    /// Display name.
    pub name: String,
    /// Player- or AI-controlled.
    pub controller: Controller,
    /// Maximum (and starting) HP.
    pub max_hp: i32,
    /// Base attack.
    pub attack: i32,
    /// Base defense.
    pub defense: i32,
    /// Speed, used for round ordering.
    pub speed: i32,
    /// Critical-hit rate as a percentage in `0..=100`.
    pub crit_rate: i32,
    /// Elemental attack values, indexed by [`Element::index`].
    pub elemental: [i32; Element::COUNT],
    /// Skill definitions; slots beyond [`MAX_SKILL_SLOTS`] are dropped.
    pub skills: Vec<SkillSpec>,
}

impl CombatantSnapshot {
    /// Returns a copy with every degenerate field degraded to its documented
    /// default, logging one warning per degradation:
    ///
    /// - `max_hp < 1` becomes 1 (a combatant must enter the battle alive);
    /// - negative attack/defense/speed/elemental values become 0;
    /// - `crit_rate` is clamped into `0..=100`;
    /// - skills beyond [`MAX_SKILL_SLOTS`] are dropped;
    /// - an attack skill with a non-finite or non-positive multiplier is
    ///   replaced by generic basic-attack behavior with the fixed default
    ///   cooldown ([`SkillSpec::basic_fallback`]);
    /// - a heal skill with a non-finite or negative fraction heals nothing.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.max_hp < 1 {
            tracing::warn!(target: "ashfall::snapshot", name = %self.name, max_hp = self.max_hp, "max HP below 1, defaulting to 1");
            self.max_hp = 1;
        }
        for (label, stat) in [
            ("attack", &mut self.attack),
            ("defense", &mut self.defense),
            ("speed", &mut self.speed),
        ] {
            if *stat < 0 {
                tracing::warn!(target: "ashfall::snapshot", name = %self.name, stat = label, value = *stat, "negative stat, defaulting to 0");
                *stat = 0;
            }
        }
        if !(0..=100).contains(&self.crit_rate) {
            tracing::warn!(target: "ashfall::snapshot", name = %self.name, crit_rate = self.crit_rate, "crit rate outside 0..=100, clamping");
            self.crit_rate = self.crit_rate.clamp(0, 100);
        }
        for element in Element::PRIORITY {
            let value = &mut self.elemental[element.index()];
            if *value < 0 {
                tracing::warn!(target: "ashfall::snapshot", name = %self.name, %element, value = *value, "negative elemental value, defaulting to 0");
                *value = 0;
            }
        }
        if self.skills.len() > MAX_SKILL_SLOTS {
            tracing::warn!(target: "ashfall::snapshot", name = %self.name, count = self.skills.len(), "too many skills, keeping the first {MAX_SKILL_SLOTS}");
            self.skills.truncate(MAX_SKILL_SLOTS);
        }
        let skills = std::mem::take(&mut self.skills);
        self.skills = skills
            .into_iter()
            .map(|skill| sanitize_skill(&self.name, skill))
            .collect();
        self
    }
}

fn sanitize_skill(owner: &str, mut skill: SkillSpec) -> SkillSpec {
    match &mut skill.effect {
        SkillEffect::Attack { multiplier } => {
            if !multiplier.is_finite() || *multiplier <= 0.0 {
                tracing::warn!(target: "ashfall::snapshot", name = owner, skill = %skill.id, "unusable attack multiplier, degrading to basic-attack behavior");
                return SkillSpec::basic_fallback(skill.id, &skill.name);
            }
        }
        SkillEffect::Heal { fraction } => {
            if !fraction.is_finite() || *fraction < 0.0 {
                tracing::warn!(target: "ashfall::snapshot", name = owner, skill = %skill.id, "unusable heal fraction, defaulting to 0");
                *fraction = 0.0;
            }
        }
        SkillEffect::Buff(_) | SkillEffect::Debuff(_) => {}
    }
    skill
}

/// Typed source of combatant snapshots for one side of a battle.
///
/// Implemented by stat-owning collaborators (equipment system, monster
/// master data). Replaces the original's reflection-driven initialization
/// with an explicit, injectable seam.
pub trait RosterProvider {
    /// Snapshots for every combatant on this side, in roster order.
    fn snapshots(&self) -> Vec<CombatantSnapshot>;
}

impl RosterProvider for Vec<CombatantSnapshot> {
    fn snapshots(&self) -> Vec<CombatantSnapshot> {
        self.clone()
    }
}

impl RosterProvider for [CombatantSnapshot] {
    fn snapshots(&self) -> Vec<CombatantSnapshot> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillId, DEFAULT_SKILL_COOLDOWN};

    fn snapshot() -> CombatantSnapshot {
        CombatantSnapshot {
            name: "slime".to_string(),
            controller: Controller::Ai,
            max_hp: 40,
            attack: 12,
            defense: 6,
            speed: 4,
            crit_rate: 5,
            elemental: [0; Element::COUNT],
            skills: Vec::new(),
        }
    }

    #[test]
    fn valid_snapshot_passes_through_unchanged() {
        let snap = snapshot();
        assert_eq!(snap.clone().sanitized(), snap);
    }

    #[test]
    fn degenerate_stats_are_defaulted() {
        let mut snap = snapshot();
        snap.max_hp = 0;
        snap.attack = -3;
        snap.crit_rate = 250;
        snap.elemental = [-1, 0, 5, 0];

        let clean = snap.sanitized();
        assert_eq!(clean.max_hp, 1);
        assert_eq!(clean.attack, 0);
        assert_eq!(clean.crit_rate, 100);
        assert_eq!(clean.elemental, [0, 0, 5, 0]);
    }

    #[test]
    fn surplus_skills_are_dropped() {
        let mut snap = snapshot();
        for i in 0..4 {
            snap.skills.push(SkillSpec {
                id: SkillId::new(&format!("skill{i}")),
                name: format!("Skill {i}"),
                max_cooldown: 1,
                effect: SkillEffect::Attack { multiplier: 1.0 },
            });
        }
        let clean = snap.sanitized();
        assert_eq!(clean.skills.len(), MAX_SKILL_SLOTS);
        assert_eq!(clean.skills[0].id, SkillId::new("skill0"));
    }

    #[test]
    fn broken_attack_multiplier_degrades_to_basic_fallback() {
        let mut snap = snapshot();
        snap.skills.push(SkillSpec {
            id: SkillId::new("glitch"),
            name: "Glitch".to_string(),
            max_cooldown: 9,
            effect: SkillEffect::Attack { multiplier: f64::NAN },
        });
        let clean = snap.sanitized();
        let skill = &clean.skills[0];
        assert_eq!(skill.max_cooldown, DEFAULT_SKILL_COOLDOWN);
        assert!(matches!(
            skill.effect,
            SkillEffect::Attack { multiplier } if (multiplier - 1.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn negative_heal_fraction_heals_nothing() {
        let mut snap = snapshot();
        snap.skills.push(SkillSpec {
            id: SkillId::new("drain"),
            name: "Drain".to_string(),
            max_cooldown: 2,
            effect: SkillEffect::Heal { fraction: -0.5 },
        });
        let clean = snap.sanitized();
        assert!(matches!(
            clean.skills[0].effect,
            SkillEffect::Heal { fraction } if fraction == 0.0
        ));
    }
}
