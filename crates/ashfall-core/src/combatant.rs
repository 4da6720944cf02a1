//! Combatant model: stats, active status effects, skill cooldowns.
//!
//! A [`Combatant`] owns everything that changes while a battle runs: current
//! HP, the alive flag, active [`StatusEffect`]s, and skill cooldown counters.
//! Base stats are fixed at battle start from a stat snapshot.
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp` at all times (clamped at the mutation boundary).
//! - `alive == (hp > 0)`.
//! - At most one status effect per [`StatusEffectId`] (reapplying replaces).
//! - Skill cooldowns stay within `0..=max_cooldown`.
//!
//! # Turn-boundary processing
//!
//! [`Combatant::begin_turn`] applies each active effect's turn-start damage
//! and heal components as independent operations in stored order. Every
//! operation is gated on the combatant still being alive: a combatant that
//! dies to one effect's damage takes nothing further from effects later in
//! the list. [`Combatant::end_turn`] decrements effect durations (dropping
//! expired effects), cools down skills, and clears the acted flag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::{self, Element};
use crate::skill::{SkillSlot, SkillSpec};
use crate::snapshot::CombatantSnapshot;
use crate::status::{StatusEffect, StatusEffectId};

/// Unique identifier for a combatant within one battle.
///
/// Ids are assigned sequentially at battle initialization (allies first,
/// then enemies) and are stable for the battle's lifetime. Ordering follows
/// the numeric value, which keeps id-based iteration deterministic.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(u32);

impl CombatantId {
    /// Creates a new `CombatantId` from a raw `u32` value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CombatantId({})", self.0)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the battle a combatant fights for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Player side.
    Ally,
    /// Opposing side.
    Enemy,
}

impl Team {
    /// The opposing team.
    #[must_use]
    pub const fn opponent(self) -> Team {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ally => write!(f, "ally"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// Who decides a combatant's actions.
///
/// This is a capability tag, not a behavioral subtype: every data field and
/// every resolution rule is identical for both variants. Only the
/// action-selection step consults it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// User-controlled combatant.
    Player,
    /// AI-controlled combatant.
    Ai,
}

/// Report of one status effect's turn-start contribution.
///
/// Amounts are what actually landed after HP clamping, so a 30-damage poison
/// tick against a combatant at 12 HP reports `damage: 12, lethal: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTick {
    /// The effect that produced this tick.
    pub effect: StatusEffectId,
    /// Damage applied by this effect's percent + flat components.
    pub damage: i32,
    /// Healing applied by this effect's percent + flat components.
    pub heal: i32,
    /// True if the damage portion killed the carrier.
    pub lethal: bool,
}

/// A single participant in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    team: Team,
    controller: Controller,
    /// Index within the combatant's own roster; used only as a deterministic
    /// tie-break, never as spatial position.
    position: u32,
    hp: i32,
    max_hp: i32,
    attack: i32,
    defense: i32,
    speed: i32,
    crit_rate: i32,
    elemental: [i32; Element::COUNT],
    alive: bool,
    acted: bool,
    skills: Vec<SkillSlot>,
    statuses: Vec<StatusEffect>,
}

impl Combatant {
    /// Builds a combatant from a sanitized stat snapshot.
    ///
    /// Callers are expected to run [`CombatantSnapshot::sanitized`] first;
    /// `Battle::initialize` does this for every roster entry.
    pub(crate) fn from_snapshot(
        id: CombatantId,
        team: Team,
        position: u32,
        snapshot: &CombatantSnapshot,
    ) -> Self {
        Self {
            id,
            name: snapshot.name.clone(),
            team,
            controller: snapshot.controller,
            position,
            hp: snapshot.max_hp,
            max_hp: snapshot.max_hp,
            attack: snapshot.attack,
            defense: snapshot.defense,
            speed: snapshot.speed,
            crit_rate: snapshot.crit_rate,
            elemental: snapshot.elemental,
            alive: snapshot.max_hp > 0,
            acted: false,
            skills: snapshot.skills.iter().cloned().map(SkillSlot::new).collect(),
            statuses: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Battle-scoped identifier.
    #[must_use]
    pub const fn id(&self) -> CombatantId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Side this combatant fights for.
    #[must_use]
    pub const fn team(&self) -> Team {
        self.team
    }

    /// Who selects this combatant's actions.
    #[must_use]
    pub const fn controller(&self) -> Controller {
        self.controller
    }

    /// Roster index, used as the final deterministic tie-break.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Current HP.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum HP.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Base attack, before status modifiers.
    #[must_use]
    pub const fn base_attack(&self) -> i32 {
        self.attack
    }

    /// Base defense, before status modifiers.
    #[must_use]
    pub const fn base_defense(&self) -> i32 {
        self.defense
    }

    /// Speed, used for round ordering. Status effects do not modify speed.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Critical-hit rate as a percentage in `0..=100`.
    #[must_use]
    pub const fn crit_rate(&self) -> i32 {
        self.crit_rate
    }

    /// True while HP is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// True once this combatant has resolved an action this round.
    #[must_use]
    pub const fn has_acted(&self) -> bool {
        self.acted
    }

    /// Active status effects, in application order (display order only;
    /// resolution semantics do not depend on it).
    #[must_use]
    pub fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    /// Skill slots in fixed slot order.
    #[must_use]
    pub fn skills(&self) -> &[SkillSlot] {
        &self.skills
    }

    /// Index of the first usable skill in slot order, if any.
    #[must_use]
    pub fn first_ready_skill(&self) -> Option<usize> {
        self.skills.iter().position(SkillSlot::is_ready)
    }

    /// True if any skill slot is off cooldown.
    #[must_use]
    pub fn has_ready_skill(&self) -> bool {
        self.first_ready_skill().is_some()
    }

    /// True while any active effect prevents this combatant from acting.
    #[must_use]
    pub fn action_prevented(&self) -> bool {
        self.statuses.iter().any(|s| s.prevents_action)
    }

    // -------------------------------------------------------------------------
    // Effective stats
    // -------------------------------------------------------------------------

    /// Attack after folding all active effects: base plus every additive
    /// modifier, times the product of every multiplicative modifier, rounded
    /// to the nearest integer and floored at zero.
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        let additive: i32 = self.statuses.iter().map(|s| s.attack_add).sum();
        let multiplier: f64 = self.statuses.iter().map(|s| s.attack_mul).product();
        fold_stat(self.attack, additive, multiplier)
    }

    /// Defense after folding all active effects; same folding order as
    /// [`Combatant::effective_attack`].
    #[must_use]
    pub fn effective_defense(&self) -> i32 {
        let additive: i32 = self.statuses.iter().map(|s| s.defense_add).sum();
        let multiplier: f64 = self.statuses.iter().map(|s| s.defense_mul).product();
        fold_stat(self.defense, additive, multiplier)
    }

    /// Elemental attack value for one element after applying every active
    /// effect's per-element multiplier.
    #[must_use]
    pub fn effective_elemental(&self, element: Element) -> i32 {
        let multiplier: f64 = self
            .statuses
            .iter()
            .map(|s| s.elemental_mul[element.index()])
            .product();
        fold_stat(self.elemental[element.index()], 0, multiplier)
    }

    /// All four effective elemental attack values, indexed by
    /// [`Element::index`].
    #[must_use]
    pub fn effective_elemental_values(&self) -> [i32; Element::COUNT] {
        let mut values = [0; Element::COUNT];
        for e in Element::PRIORITY {
            values[e.index()] = self.effective_elemental(e);
        }
        values
    }

    /// Dominant element: the strictly largest effective elemental value,
    /// ties broken fire > water > wind > earth. `None` when every value is
    /// zero (elementless).
    #[must_use]
    pub fn dominant_element(&self) -> Option<Element> {
        element::dominant(self.effective_elemental_values())
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Applies damage, clamping HP at zero. No-op on a dead combatant and
    /// for non-positive amounts.
    ///
    /// Returns `true` exactly when this call killed the combatant.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
            tracing::debug!(target: "ashfall::combatant", id = %self.id, name = %self.name, "combatant died");
            return true;
        }
        false
    }

    /// Restores HP, clamping at max. No-op on a dead combatant and for
    /// non-positive amounts.
    ///
    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive || amount <= 0 {
            return 0;
        }
        let applied = amount.min(self.max_hp - self.hp);
        self.hp += applied;
        applied
    }

    /// Attaches a status effect, replacing any existing instance with the
    /// same id (the new application's values and duration win; effects never
    /// stack).
    ///
    /// Returns `true` if an existing instance was replaced.
    pub fn apply_status(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.statuses.iter_mut().find(|s| s.id == effect.id) {
            *existing = effect;
            true
        } else {
            self.statuses.push(effect);
            false
        }
    }

    /// Turn-start processing: applies each active effect's damage and heal
    /// components as independent operations in stored order.
    ///
    /// Death is re-checked before every operation; a combatant killed partway
    /// through the list takes no further damage or healing from the effects
    /// after the one that killed it.
    pub fn begin_turn(&mut self) -> Vec<StatusTick> {
        let ops: Vec<(StatusEffectId, [i32; 2], [i32; 2])> = self
            .statuses
            .iter()
            .map(|s| {
                (
                    s.id.clone(),
                    [fraction_of(self.max_hp, s.damage_fraction), s.damage_flat],
                    [fraction_of(self.max_hp, s.heal_fraction), s.heal_flat],
                )
            })
            .collect();

        let mut ticks = Vec::new();
        for (effect, damage_ops, heal_ops) in ops {
            if !self.alive {
                break;
            }
            let mut tick = StatusTick {
                effect,
                damage: 0,
                heal: 0,
                lethal: false,
            };
            for amount in damage_ops {
                if !self.alive {
                    break;
                }
                let before = self.hp;
                tick.lethal |= self.take_damage(amount);
                tick.damage += before - self.hp;
            }
            for amount in heal_ops {
                if !self.alive {
                    break;
                }
                tick.heal += self.heal(amount);
            }
            if tick.damage > 0 || tick.heal > 0 {
                ticks.push(tick);
            }
        }
        ticks
    }

    /// Turn-end processing: ticks down effect durations (removing expired
    /// effects), cools down both skill slots, and clears the acted flag.
    ///
    /// Returns the ids of effects that expired this turn.
    pub fn end_turn(&mut self) -> Vec<StatusEffectId> {
        let mut expired = Vec::new();
        for status in &mut self.statuses {
            if status.tick() {
                expired.push(status.id.clone());
            }
        }
        self.statuses.retain(|s| s.turns > 0);
        for slot in &mut self.skills {
            slot.cool_down();
        }
        self.acted = false;
        expired
    }

    /// Marks the combatant as having resolved its action this round.
    pub(crate) fn mark_acted(&mut self) {
        self.acted = true;
    }

    /// Triggers the cooldown of the skill in `slot`.
    pub(crate) fn trigger_skill(&mut self, slot: usize) {
        if let Some(skill) = self.skills.get_mut(slot) {
            skill.trigger();
        }
    }

    /// Skill spec in `slot`, if present.
    #[must_use]
    pub fn skill_spec(&self, slot: usize) -> Option<&SkillSpec> {
        self.skills.get(slot).map(SkillSlot::spec)
    }
}

/// Folds a base stat with summed additive and multiplied multiplicative
/// modifiers: `round((base + additive) * multiplier)`, floored at zero.
#[allow(clippy::cast_possible_truncation)]
fn fold_stat(base: i32, additive: i32, multiplier: f64) -> i32 {
    ((f64::from(base + additive) * multiplier).round() as i32).max(0)
}

/// Rounds `max_hp * fraction` to the nearest integer.
#[allow(clippy::cast_possible_truncation)]
fn fraction_of(max_hp: i32, fraction: f64) -> i32 {
    (f64::from(max_hp) * fraction).round() as i32
}
