//! Events emitted by the battle orchestrator.
//!
//! The core computes state transitions and values only; rendering, logging,
//! and reward collaborators consume the event stream. Every resolved actor
//! turn produces one [`TurnOutcome`] carrying the ordered [`BattleEvent`]s
//! of that turn; the terminal transition additionally carries
//! [`BattleEvent::BattleEnded`].

use serde::{Deserialize, Serialize};

use crate::battle::BattleResult;
use crate::combatant::CombatantId;
use crate::element::ElementRelation;
use crate::skill::SkillId;
use crate::status::{StatusEffectId, StatusKind};

/// Why an actor's turn resolved without an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Turn-start effect damage killed the actor before it could act.
    DiedAtTurnStart,
    /// An active status effect prevents the actor from acting.
    ActionPrevented,
    /// No living target remained on the opposing side.
    NoLivingTarget,
    /// The battle hit its turn limit before this actor could act.
    TurnLimit,
}

/// The action an actor resolved this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionTaken {
    /// Plain attack against the selected target.
    BasicAttack,
    /// Skill use, by id.
    Skill(SkillId),
    /// No action was resolved.
    Skipped(SkipReason),
}

/// One thing that happened during a turn, in resolution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The round queue was exhausted and rebuilt; the turn counter advanced.
    TurnAdvanced {
        /// New value of the turn counter.
        turn: u32,
    },
    /// An attack or damage skill landed.
    DamageDealt {
        /// Acting combatant.
        attacker: CombatantId,
        /// Combatant that took the damage.
        target: CombatantId,
        /// Damage applied after HP clamping.
        amount: i32,
        /// Elemental relation of the hit, `None` for elementless attacks.
        relation: Option<ElementRelation>,
        /// Whether the critical roll fired.
        crit: bool,
    },
    /// A heal landed.
    HealApplied {
        /// Combatant whose skill produced the heal.
        source: CombatantId,
        /// Combatant healed (currently always the source).
        target: CombatantId,
        /// HP actually restored after clamping at max.
        amount: i32,
    },
    /// A status effect started (or replaced an instance with the same id).
    StatusApplied {
        /// Combatant now carrying the effect.
        target: CombatantId,
        /// Effect identity.
        effect: StatusEffectId,
        /// Buff or debuff.
        kind: StatusKind,
        /// True when an existing instance was replaced rather than added.
        replaced: bool,
    },
    /// A status effect's turn-start damage ticked.
    StatusDamage {
        /// Carrier of the effect.
        target: CombatantId,
        /// Effect identity.
        effect: StatusEffectId,
        /// Damage applied after HP clamping.
        amount: i32,
    },
    /// A status effect's turn-start heal ticked.
    StatusHeal {
        /// Carrier of the effect.
        target: CombatantId,
        /// Effect identity.
        effect: StatusEffectId,
        /// HP actually restored.
        amount: i32,
    },
    /// A status effect ran out of turns and was removed.
    StatusExpired {
        /// Former carrier of the effect.
        target: CombatantId,
        /// Effect identity.
        effect: StatusEffectId,
    },
    /// A combatant's HP reached zero.
    CombatantDied {
        /// The combatant that died.
        combatant: CombatantId,
    },
    /// The battle reached a terminal state.
    BattleEnded {
        /// Victory, defeat, or timeout.
        result: BattleResult,
    },
}

/// Everything that happened while resolving one actor's turn.
///
/// `advance_turn` returns exactly one of these per resolved turn; the
/// `events` list is ordered and complete, so collaborators can replay a
/// battle's presentation from outcomes alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Turn counter at the time the actor resolved.
    pub turn: u32,
    /// Acting combatant; `None` only for the turn-limit transition, which
    /// ends the battle before another actor can be dequeued.
    pub actor: Option<CombatantId>,
    /// What the actor did.
    pub action: ActionTaken,
    /// Target of the action, when it had one. Self-targeted actions (heals,
    /// buffs) name the actor.
    pub target: Option<CombatantId>,
    /// Damage dealt or HP healed by the action itself (status-effect ticks
    /// are reported in `events` instead). Zero for buffs, debuffs, and skips.
    pub amount: i32,
    /// Ordered events of this turn.
    pub events: Vec<BattleEvent>,
    /// Set when this turn ended the battle.
    pub ended: Option<BattleResult>,
}
