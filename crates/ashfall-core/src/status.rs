//! Timed status effects.
//!
//! A [`StatusEffect`] is a bundle of stat modifiers plus optional turn-start
//! damage/heal ticks, carried by a combatant for a fixed number of turns.
//! A combatant holds at most one instance per effect id: re-applying an id
//! that is already present replaces the existing instance outright (the new
//! application's values and remaining turns win; nothing stacks).
//!
//! Modifier folding order is defined by the combatant model: all additive
//! modifiers are summed into the base stat first, then the product of all
//! multiplicative modifiers is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::Element;

/// Unique identifier for a status effect.
///
/// Two effects with the same id are considered the same effect for the
/// replace-on-reapply rule, regardless of their other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffectId(String);

impl StatusEffectId {
    /// Creates a new `StatusEffectId` from a string.
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

impl fmt::Display for StatusEffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StatusEffectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Whether an effect counts as helpful or harmful.
///
/// The category does not change how the effect resolves; it exists for
/// skill dispatch (buff skills target self, debuff skills target an enemy)
/// and for display collaborators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Helpful effect, applied to the user's own side.
    Buff,
    /// Harmful effect, applied to an opponent.
    Debuff,
}

/// A timed modifier bundle attached to a combatant.
///
/// All modifier fields default to neutral values (`0` additive, `1.0`
/// multiplicative, no ticks, no action prevention); constructors set only
/// identity, category, and duration, and callers fill in what the effect
/// actually does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Identity used for the replace-on-reapply rule.
    pub id: StatusEffectId,
    /// Display name for log/UI collaborators.
    pub name: String,
    /// Buff or debuff.
    pub kind: StatusKind,
    /// Turns left. Decremented at the carrier's turn end; the effect is
    /// removed once this reaches zero.
    pub turns: u32,
    /// Added to base attack before multiplicative folding.
    pub attack_add: i32,
    /// Added to base defense before multiplicative folding.
    pub defense_add: i32,
    /// Multiplied into effective attack.
    pub attack_mul: f64,
    /// Multiplied into effective defense.
    pub defense_mul: f64,
    /// Per-element multipliers on the carrier's elemental attack values,
    /// indexed by [`Element::index`].
    pub elemental_mul: [f64; Element::COUNT],
    /// While set, the carrier skips its action (turn-start and turn-end
    /// processing still run).
    pub prevents_action: bool,
    /// Turn-start damage as a fraction of the carrier's max HP.
    pub damage_fraction: f64,
    /// Turn-start flat damage.
    pub damage_flat: i32,
    /// Turn-start heal as a fraction of the carrier's max HP.
    pub heal_fraction: f64,
    /// Turn-start flat heal.
    pub heal_flat: i32,
}

impl StatusEffect {
    /// Creates an effect with neutral modifiers.
    #[must_use]
    pub fn new(id: &str, name: &str, kind: StatusKind, turns: u32) -> Self {
        Self {
            id: StatusEffectId::new(id),
            name: name.to_string(),
            kind,
            turns,
            attack_add: 0,
            defense_add: 0,
            attack_mul: 1.0,
            defense_mul: 1.0,
            elemental_mul: [1.0; Element::COUNT],
            prevents_action: false,
            damage_fraction: 0.0,
            damage_flat: 0,
            heal_fraction: 0.0,
            heal_flat: 0,
        }
    }

    /// Decrements the remaining turns, flooring at zero.
    ///
    /// Returns `true` once the effect has expired (remaining turns hit zero).
    pub fn tick(&mut self) -> bool {
        self.turns = self.turns.saturating_sub(1);
        self.turns == 0
    }

    /// True if the effect has any turn-start damage component.
    #[must_use]
    pub fn has_turn_start_damage(&self) -> bool {
        self.damage_fraction > 0.0 || self.damage_flat > 0
    }

    /// True if the effect has any turn-start heal component.
    #[must_use]
    pub fn has_turn_start_heal(&self) -> bool {
        self.heal_fraction > 0.0 || self.heal_flat > 0
    }
}
