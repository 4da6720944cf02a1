//! Round queue construction.
//!
//! Every living combatant from both sides acts once per round. The queue is
//! ordered by descending speed with deterministic tie-breaks (ally before
//! enemy, then ascending position index) and is rebuilt *from scratch* each
//! time it empties: a combatant that died mid-round is simply absent from the
//! next build, and one revived mid-round would join at the next build, not
//! the current one.

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::combatant::{Combatant, CombatantId, Team};

/// Ordered queue of combatants scheduled to act this round.
#[derive(Debug, Clone, Default)]
pub struct RoundQueue {
    queue: VecDeque<CombatantId>,
}

impl RoundQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the queue from the living combatants of both rosters.
    ///
    /// Ordering: descending speed, then ally before enemy, then ascending
    /// position index. Any previous queue contents are discarded.
    pub fn rebuild(&mut self, allies: &[Combatant], enemies: &[Combatant]) {
        let mut entries: Vec<&Combatant> = allies
            .iter()
            .chain(enemies.iter())
            .filter(|c| c.is_alive())
            .collect();
        entries.sort_by_key(|c| (Reverse(c.speed()), team_rank(c.team()), c.position()));
        self.queue = entries.into_iter().map(Combatant::id).collect();
    }

    /// Removes and returns the next combatant to act.
    pub fn pop_next(&mut self) -> Option<CombatantId> {
        self.queue.pop_front()
    }

    /// True once every scheduled combatant has been dequeued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of combatants still scheduled this round.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Remaining scheduled ids in act order.
    pub fn iter(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.queue.iter().copied()
    }
}

/// Allies act before enemies on speed ties.
const fn team_rank(team: Team) -> u8 {
    match team {
        Team::Ally => 0,
        Team::Enemy => 1,
    }
}
