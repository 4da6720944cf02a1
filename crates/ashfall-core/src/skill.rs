//! Skills and cooldown slots.
//!
//! A combatant carries up to [`MAX_SKILL_SLOTS`] skills. Each skill is usable
//! only while its cooldown counter is zero; using it resets the counter to the
//! skill's maximum, and the counter drops by one at the owner's turn end.
//!
//! What a skill *does* is a typed [`SkillEffect`]: damage with a multiplier,
//! a self-heal scaled from the user's max HP, or a status-effect application.
//! The action-selection step dispatches on the category, so a heal skill can
//! never route through the damage formula.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::status::StatusEffect;

/// Maximum number of skill slots per combatant.
pub const MAX_SKILL_SLOTS: usize = 2;

/// Cooldown assigned when degenerate skill data is degraded to basic-attack
/// behavior (see [`crate::snapshot::CombatantSnapshot::sanitized`]).
pub const DEFAULT_SKILL_COOLDOWN: u32 = 2;

/// Unique identifier for a skill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(String);

impl SkillId {
    /// Creates a new `SkillId` from a string.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// What a skill does when it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Elemental damage against a selected enemy, with a multiplier fed into
    /// the damage formula (`1.0` behaves like a basic attack).
    Attack {
        /// Damage-formula multiplier. Must be finite and positive.
        multiplier: f64,
    },
    /// Heals the user for `round(max_hp * fraction)`.
    Heal {
        /// Fraction of the user's max HP restored.
        fraction: f64,
    },
    /// Applies a status effect to the user.
    Buff(StatusEffect),
    /// Applies a status effect to a selected enemy.
    Debuff(StatusEffect),
}

/// Immutable definition of a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSpec {
    /// Skill identity.
    pub id: SkillId,
    /// Display name for log/UI collaborators.
    pub name: String,
    /// Cooldown in turns applied after each use.
    pub max_cooldown: u32,
    /// What the skill does.
    pub effect: SkillEffect,
}

impl SkillSpec {
    /// Fallback spec used when skill data cannot be honored: plain
    /// basic-attack behavior with [`DEFAULT_SKILL_COOLDOWN`].
    #[must_use]
    pub fn basic_fallback(id: SkillId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            max_cooldown: DEFAULT_SKILL_COOLDOWN,
            effect: SkillEffect::Attack { multiplier: 1.0 },
        }
    }
}

/// A skill slot on a combatant: the spec plus its live cooldown counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSlot {
    spec: SkillSpec,
    cooldown: u32,
}

impl SkillSlot {
    /// Creates a slot with the skill ready to use.
    #[must_use]
    pub fn new(spec: SkillSpec) -> Self {
        Self { spec, cooldown: 0 }
    }

    /// Returns the skill definition.
    #[must_use]
    pub fn spec(&self) -> &SkillSpec {
        &self.spec
    }

    /// Current cooldown counter.
    #[must_use]
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// True while the skill can be used.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }

    /// Marks the skill as used, resetting the counter to the spec maximum.
    pub fn trigger(&mut self) {
        self.cooldown = self.spec.max_cooldown;
    }

    /// Turn-end bookkeeping: drops the counter by one, flooring at zero.
    pub fn cool_down(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}
