//! Setup-time errors.
//!
//! Configuration problems are the only errors this crate surfaces: they are
//! rejected before the battle starts. Everything that can go wrong *during*
//! a battle is absorbed by clamping or documented fallback defaults instead
//! (see [`crate::snapshot`]), so the simulation itself is infallible.

use thiserror::Error;

use crate::combatant::Team;

/// Rejected battle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A battle needs at least one combatant on each side.
    #[error("the {0} roster is empty; each side needs at least one combatant")]
    EmptyRoster(Team),
    /// The turn limit must allow at least one round.
    #[error("turn limit must be at least 1, got {0}")]
    InvalidTurnLimit(u32),
}
