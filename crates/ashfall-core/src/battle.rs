//! Battle orchestrator: the state machine that drives a battle to a
//! terminal result.
//!
//! A [`Battle`] owns both rosters, the round queue, the turn counter, and
//! the injected [`RollSource`]. It is advanced by an external driver through
//! [`Battle::advance_turn`]; each call resolves exactly one actor's full
//! turn (turn-start effects, action, turn-end effects) as an atomic,
//! non-interruptible unit and returns the [`TurnOutcome`] describing it.
//! The core holds no locks and never suspends: any pacing, animation delay,
//! or UI refresh happens in the caller between calls.
//!
//! # State machine
//!
//! ```text
//! Initializing -> InProgress -> { Victory | Defeat | TimeUp }
//! ```
//!
//! Initialization populates the rosters from stat snapshots and builds the
//! first round queue. While in progress, every advance checks the turn
//! limit, rebuilds the queue when the round is exhausted, skips dead
//! actors, and re-evaluates termination after every resolved turn: all
//! enemies dead is Victory, all allies dead is Defeat, checked in that
//! order (a simultaneous full wipe resolves as Victory). Terminal states
//! are final; further [`Battle::advance_turn`] calls return `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::combatant::{Combatant, CombatantId, Team};
use crate::damage;
use crate::error::SetupError;
use crate::event::{ActionTaken, BattleEvent, SkipReason, TurnOutcome};
use crate::rng::{RollSource, SeededRolls};
use crate::scheduler::RoundQueue;
use crate::skill::SkillEffect;
use crate::snapshot::{CombatantSnapshot, RosterProvider};
use crate::targeting;

/// Terminal outcome of a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    /// Every enemy is dead.
    Victory,
    /// Every ally is dead.
    Defeat,
    /// The turn limit was reached with both sides still standing.
    TimeUp,
}

impl fmt::Display for BattleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::TimeUp => write!(f, "time up"),
        }
    }
}

/// A running battle.
pub struct Battle {
    allies: Vec<Combatant>,
    enemies: Vec<Combatant>,
    queue: RoundQueue,
    turn: u32,
    turn_limit: u32,
    result: Option<BattleResult>,
    rolls: Box<dyn RollSource>,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("allies", &self.allies)
            .field("enemies", &self.enemies)
            .field("queue", &self.queue)
            .field("turn", &self.turn)
            .field("turn_limit", &self.turn_limit)
            .field("result", &self.result)
            .field("rolls", &"<roll source>")
            .finish()
    }
}

impl Battle {
    /// Initializes a battle from stat snapshots and an injected roll source.
    ///
    /// Snapshots are sanitized at this boundary (degenerate values degrade
    /// to documented defaults with a diagnostic, see
    /// [`CombatantSnapshot::sanitized`]); configuration problems are the
    /// only hard failures.
    ///
    /// # Errors
    ///
    /// [`SetupError::EmptyRoster`] when either side has no combatants;
    /// [`SetupError::InvalidTurnLimit`] when `turn_limit` is zero.
    pub fn initialize(
        allies: &[CombatantSnapshot],
        enemies: &[CombatantSnapshot],
        turn_limit: u32,
        rolls: Box<dyn RollSource>,
    ) -> Result<Self, SetupError> {
        if allies.is_empty() {
            return Err(SetupError::EmptyRoster(Team::Ally));
        }
        if enemies.is_empty() {
            return Err(SetupError::EmptyRoster(Team::Enemy));
        }
        if turn_limit == 0 {
            return Err(SetupError::InvalidTurnLimit(turn_limit));
        }

        let mut next_id = 0u32;
        let mut build = |team: Team, snapshots: &[CombatantSnapshot]| -> Vec<Combatant> {
            snapshots
                .iter()
                .enumerate()
                .map(|(position, snapshot)| {
                    let id = CombatantId::new(next_id);
                    next_id += 1;
                    #[allow(clippy::cast_possible_truncation)]
                    let position = position as u32;
                    Combatant::from_snapshot(id, team, position, &snapshot.clone().sanitized())
                })
                .collect()
        };
        let allies = build(Team::Ally, allies);
        let enemies = build(Team::Enemy, enemies);

        let mut queue = RoundQueue::new();
        queue.rebuild(&allies, &enemies);
        tracing::debug!(
            target: "ashfall::battle",
            allies = allies.len(),
            enemies = enemies.len(),
            turn_limit,
            "battle initialized"
        );

        Ok(Self {
            allies,
            enemies,
            queue,
            turn: 0,
            turn_limit,
            result: None,
            rolls,
        })
    }

    /// Initializes a battle with the stock seeded roll source. The same
    /// seed and rosters reproduce an identical battle trace.
    ///
    /// # Errors
    ///
    /// Same as [`Battle::initialize`].
    pub fn seeded(
        allies: &[CombatantSnapshot],
        enemies: &[CombatantSnapshot],
        turn_limit: u32,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::initialize(allies, enemies, turn_limit, Box::new(SeededRolls::new(seed)))
    }

    /// Initializes a battle from roster providers (the typed seam for
    /// equipment / master-data collaborators).
    ///
    /// # Errors
    ///
    /// Same as [`Battle::initialize`].
    pub fn from_providers(
        allies: &dyn RosterProvider,
        enemies: &dyn RosterProvider,
        turn_limit: u32,
        rolls: Box<dyn RollSource>,
    ) -> Result<Self, SetupError> {
        Self::initialize(&allies.snapshots(), &enemies.snapshots(), turn_limit, rolls)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Terminal result, `None` while the battle is in progress.
    #[must_use]
    pub const fn result(&self) -> Option<BattleResult> {
        self.result
    }

    /// True once the battle reached a terminal state.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Current turn counter.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Configured turn limit.
    #[must_use]
    pub const fn turn_limit(&self) -> u32 {
        self.turn_limit
    }

    /// Ally roster in position order.
    #[must_use]
    pub fn allies(&self) -> &[Combatant] {
        &self.allies
    }

    /// Enemy roster in position order.
    #[must_use]
    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    /// Read-only stats + status view of one combatant, for rendering and
    /// logging collaborators.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        let (team, index) = self.locate(id)?;
        self.side(team).get(index)
    }

    // -------------------------------------------------------------------------
    // Simulation step
    // -------------------------------------------------------------------------

    /// Resolves the next actor's full turn.
    ///
    /// Returns `None` once the battle is over. Otherwise returns exactly one
    /// [`TurnOutcome`]; if that turn drove the battle into a terminal state,
    /// the outcome's `ended` field (and a [`BattleEvent::BattleEnded`]) says
    /// so, and every later call returns `None`.
    pub fn advance_turn(&mut self) -> Option<TurnOutcome> {
        if self.result.is_some() {
            return None;
        }
        let mut events = Vec::new();
        loop {
            if self.turn >= self.turn_limit {
                let result = BattleResult::TimeUp;
                self.result = Some(result);
                tracing::info!(target: "ashfall::battle", turn = self.turn, "turn limit reached");
                events.push(BattleEvent::BattleEnded { result });
                return Some(TurnOutcome {
                    turn: self.turn,
                    actor: None,
                    action: ActionTaken::Skipped(SkipReason::TurnLimit),
                    target: None,
                    amount: 0,
                    events,
                    ended: Some(result),
                });
            }

            if self.queue.is_empty() {
                self.turn += 1;
                self.queue.rebuild(&self.allies, &self.enemies);
                events.push(BattleEvent::TurnAdvanced { turn: self.turn });
                // Fall through: the freshly built round acts before the
                // limit is checked again.
            }

            let Some(actor_id) = self.queue.pop_next() else {
                continue;
            };
            let Some((team, index)) = self.locate(actor_id) else {
                continue;
            };
            if !self.side(team)[index].is_alive() {
                // Died earlier this round: no action, no turn-start/end
                // processing.
                continue;
            }
            return Some(self.resolve_actor_turn(actor_id, team, index, events));
        }
    }

    /// Runs one actor's complete turn: turn-start effects, action, turn-end
    /// effects, termination check.
    fn resolve_actor_turn(
        &mut self,
        actor_id: CombatantId,
        team: Team,
        index: usize,
        mut events: Vec<BattleEvent>,
    ) -> TurnOutcome {
        // Turn start: status-effect ticks.
        for tick in self.side_mut(team)[index].begin_turn() {
            if tick.damage > 0 {
                events.push(BattleEvent::StatusDamage {
                    target: actor_id,
                    effect: tick.effect.clone(),
                    amount: tick.damage,
                });
            }
            if tick.heal > 0 {
                events.push(BattleEvent::StatusHeal {
                    target: actor_id,
                    effect: tick.effect.clone(),
                    amount: tick.heal,
                });
            }
            if tick.lethal {
                events.push(BattleEvent::CombatantDied {
                    combatant: actor_id,
                });
            }
        }

        // Action, unless turn-start effects killed the actor or an active
        // effect prevents acting.
        let actor = &self.side(team)[index];
        let (action, target, amount) = if !actor.is_alive() {
            (ActionTaken::Skipped(SkipReason::DiedAtTurnStart), None, 0)
        } else if actor.action_prevented() {
            tracing::debug!(target: "ashfall::battle", actor = %actor_id, "action prevented by status effect");
            (ActionTaken::Skipped(SkipReason::ActionPrevented), None, 0)
        } else {
            self.resolve_action(actor_id, team, index, &mut events)
        };
        if !matches!(action, ActionTaken::Skipped(_)) {
            self.side_mut(team)[index].mark_acted();
        }

        // Turn end: effect expiry and cooldowns, even when the action was
        // skipped (and even if the actor died to its own effects).
        for effect in self.side_mut(team)[index].end_turn() {
            events.push(BattleEvent::StatusExpired {
                target: actor_id,
                effect,
            });
        }

        self.check_termination(&mut events);

        TurnOutcome {
            turn: self.turn,
            actor: Some(actor_id),
            action,
            target,
            amount,
            events,
            ended: self.result,
        }
    }

    /// Picks and resolves the actor's action: first usable skill in slot
    /// order, else a basic attack.
    fn resolve_action(
        &mut self,
        actor_id: CombatantId,
        team: Team,
        index: usize,
        events: &mut Vec<BattleEvent>,
    ) -> (ActionTaken, Option<CombatantId>, i32) {
        let Some(slot) = self.side(team)[index].first_ready_skill() else {
            return self.resolve_strike(actor_id, team, index, 1.0, ActionTaken::BasicAttack, None, events);
        };
        let Some(spec) = self.side(team)[index].skill_spec(slot).cloned() else {
            return self.resolve_strike(actor_id, team, index, 1.0, ActionTaken::BasicAttack, None, events);
        };
        let action = ActionTaken::Skill(spec.id.clone());

        match spec.effect {
            SkillEffect::Attack { multiplier } => {
                self.resolve_strike(actor_id, team, index, multiplier, action, Some(slot), events)
            }
            SkillEffect::Heal { fraction } => {
                self.side_mut(team)[index].trigger_skill(slot);
                let amount = {
                    let healer = &self.side(team)[index];
                    damage::calculate_heal_amount(healer, &SkillEffect::Heal { fraction })
                };
                let applied = self.side_mut(team)[index].heal(amount);
                events.push(BattleEvent::HealApplied {
                    source: actor_id,
                    target: actor_id,
                    amount: applied,
                });
                (action, Some(actor_id), applied)
            }
            SkillEffect::Buff(effect) => {
                self.side_mut(team)[index].trigger_skill(slot);
                let kind = effect.kind;
                let effect_id = effect.id.clone();
                let replaced = self.side_mut(team)[index].apply_status(effect);
                events.push(BattleEvent::StatusApplied {
                    target: actor_id,
                    effect: effect_id,
                    kind,
                    replaced,
                });
                (action, Some(actor_id), 0)
            }
            SkillEffect::Debuff(effect) => {
                let Some(target_id) = self.pick_target(team, index) else {
                    return (ActionTaken::Skipped(SkipReason::NoLivingTarget), None, 0);
                };
                let Some((target_team, target_index)) = self.locate(target_id) else {
                    return (ActionTaken::Skipped(SkipReason::NoLivingTarget), None, 0);
                };
                self.side_mut(team)[index].trigger_skill(slot);
                let kind = effect.kind;
                let effect_id = effect.id.clone();
                let replaced = self.side_mut(target_team)[target_index].apply_status(effect);
                events.push(BattleEvent::StatusApplied {
                    target: target_id,
                    effect: effect_id,
                    kind,
                    replaced,
                });
                (action, Some(target_id), 0)
            }
        }
    }

    /// Resolves a basic attack or attack skill against a selected target.
    #[allow(clippy::too_many_arguments)]
    fn resolve_strike(
        &mut self,
        actor_id: CombatantId,
        team: Team,
        index: usize,
        multiplier: f64,
        action: ActionTaken,
        slot: Option<usize>,
        events: &mut Vec<BattleEvent>,
    ) -> (ActionTaken, Option<CombatantId>, i32) {
        let Some(target_id) = self.pick_target(team, index) else {
            return (ActionTaken::Skipped(SkipReason::NoLivingTarget), None, 0);
        };
        let Some((target_team, target_index)) = self.locate(target_id) else {
            return (ActionTaken::Skipped(SkipReason::NoLivingTarget), None, 0);
        };
        if let Some(slot) = slot {
            self.side_mut(team)[index].trigger_skill(slot);
        }

        let report = {
            let Self {
                allies,
                enemies,
                rolls,
                ..
            } = self;
            let (attacker, defender) = match team {
                Team::Ally => (&allies[index], &enemies[target_index]),
                Team::Enemy => (&enemies[index], &allies[target_index]),
            };
            damage::calculate_damage(attacker, defender, multiplier, rolls.as_mut())
        };

        let target = &mut self.side_mut(target_team)[target_index];
        let before = target.hp();
        let died = target.take_damage(report.amount);
        let applied = before - target.hp();
        events.push(BattleEvent::DamageDealt {
            attacker: actor_id,
            target: target_id,
            amount: applied,
            relation: report.relation,
            crit: report.crit,
        });
        if died {
            events.push(BattleEvent::CombatantDied {
                combatant: target_id,
            });
        }
        (action, Some(target_id), applied)
    }

    /// Target selection from the opposing living roster.
    fn pick_target(&self, team: Team, index: usize) -> Option<CombatantId> {
        targeting::select_target(&self.side(team)[index], self.side(team.opponent()))
    }

    /// Termination check, run after every resolved actor turn. Enemies are
    /// checked before allies, so a simultaneous full wipe is a Victory.
    fn check_termination(&mut self, events: &mut Vec<BattleEvent>) {
        if self.result.is_some() {
            return;
        }
        let result = if self.enemies.iter().all(|c| !c.is_alive()) {
            Some(BattleResult::Victory)
        } else if self.allies.iter().all(|c| !c.is_alive()) {
            Some(BattleResult::Defeat)
        } else {
            None
        };
        if let Some(result) = result {
            self.result = Some(result);
            tracing::info!(target: "ashfall::battle", turn = self.turn, %result, "battle ended");
            events.push(BattleEvent::BattleEnded { result });
        }
    }

    // -------------------------------------------------------------------------
    // Roster plumbing
    // -------------------------------------------------------------------------

    /// Maps an id to its side and roster index. Ids are assigned
    /// sequentially at initialization: allies first, then enemies.
    fn locate(&self, id: CombatantId) -> Option<(Team, usize)> {
        let raw = id.as_u32() as usize;
        if raw < self.allies.len() {
            Some((Team::Ally, raw))
        } else {
            let index = raw - self.allies.len();
            (index < self.enemies.len()).then_some((Team::Enemy, index))
        }
    }

    fn side(&self, team: Team) -> &[Combatant] {
        match team {
            Team::Ally => &self.allies,
            Team::Enemy => &self.enemies,
        }
    }

    fn side_mut(&mut self, team: Team) -> &mut [Combatant] {
        match team {
            Team::Ally => &mut self.allies,
            Team::Enemy => &mut self.enemies,
        }
    }
}
