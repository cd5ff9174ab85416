//! Errors reported by rule-set validation.

use crate::core::Role;
use thiserror::Error;

/// Problems found by [`PeerMachineBuilder::validate`](super::PeerMachineBuilder::validate).
///
/// Building never fails; these are opt-in strictness checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Duplicate {role} rule {from} -> {to}; only the first registration is used")]
    DuplicateRule {
        role: Role,
        from: String,
        to: String,
    },

    #[error("{role} guard on {from} -> {to} has no matching {} rule and will never run", .role.counterpart())]
    GuardWithoutRule {
        role: Role,
        from: String,
        to: String,
    },
}
