//! Test module for determinism, integration, and property tests.
//!
//! Module-level unit tests live next to their modules; this directory holds
//! the cross-module suites:
//!
//! - `integration.rs`: end-to-end battles through the public step API
//! - `determinism.rs`: fixed-seed trace reproducibility
//! - `properties.rs`: proptest invariants (HP clamping, defense
//!   monotonicity, advantage defense-bypass, status replacement)
//! - `helpers.rs`: snapshot factories and battle-driving utilities

mod helpers;
mod properties;

// Re-export for convenience
pub use helpers::*;
