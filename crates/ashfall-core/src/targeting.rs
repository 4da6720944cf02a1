//! Target selection.
//!
//! [`select_target`] is a strict four-stage narrowing pipeline, not a
//! weighted score. Each stage either narrows the candidate pool or leaves it
//! untouched when it would empty it; only the final stage (lowest position
//! index) is guaranteed to produce a single combatant.
//!
//! 1. Candidates the actor has elemental advantage over.
//! 2. Lowest current HP.
//! 3. Candidates with at least one usable skill.
//! 4. Lowest position index.

use crate::combatant::{Combatant, CombatantId};
use crate::element::ElementRelation;

/// Picks a target for `actor` from `candidates` (the opposing roster).
///
/// Dead candidates are ignored; returns `None` when no candidate is alive.
#[must_use]
pub fn select_target(actor: &Combatant, candidates: &[Combatant]) -> Option<CombatantId> {
    let mut pool: Vec<&Combatant> = candidates.iter().filter(|c| c.is_alive()).collect();
    if pool.is_empty() {
        return None;
    }

    // Stage 1: prefer targets the actor's dominant element beats.
    if let Some(element) = actor.dominant_element() {
        let advantaged: Vec<&Combatant> = pool
            .iter()
            .copied()
            .filter(|c| element.relation_to(c.dominant_element()) == ElementRelation::Advantage)
            .collect();
        if !advantaged.is_empty() {
            pool = advantaged;
        }
    }

    // Stage 2: lowest current HP, keeping every tie.
    let min_hp = pool.iter().map(|c| c.hp()).min()?;
    pool.retain(|c| c.hp() == min_hp);

    // Stage 3: prefer targets that still threaten a skill use.
    let with_skill: Vec<&Combatant> = pool
        .iter()
        .copied()
        .filter(|c| c.has_ready_skill())
        .collect();
    if !with_skill.is_empty() {
        pool = with_skill;
    }

    // Stage 4: lowest position index breaks every remaining tie.
    pool.into_iter().min_by_key(|c| c.position()).map(Combatant::id)
}
