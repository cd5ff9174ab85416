//! Outcomes of local transition attempts and remote absorption.

use thiserror::Error;

/// Why a local transition attempt was refused.
///
/// State names come from [`State::name`](crate::core::State::name) so the
/// error stays independent of the state type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("No rule for transition {from} -> {to}")]
    NoRule { from: String, to: String },

    #[error("State and remote state do not match ({state} != {remote}), rule requires a match")]
    ServerClientStateMismatch { state: String, remote: String },

    #[error("State and remote state match ({state} == {remote}), rule requires a mismatch")]
    ServerClientStateMatch { state: String, remote: String },
}

/// Field-less tag for a [`TransitionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailReason {
    NoRule,
    ServerClientStateMismatch,
    ServerClientStateMatch,
}

impl TransitionError {
    pub fn kind(&self) -> FailReason {
        match self {
            Self::NoRule { .. } => FailReason::NoRule,
            Self::ServerClientStateMismatch { .. } => FailReason::ServerClientStateMismatch,
            Self::ServerClientStateMatch { .. } => FailReason::ServerClientStateMatch,
        }
    }
}

/// What [`report_remote_state`](crate::peer::PeerMachine::report_remote_state)
/// did with an observation. The remote state is recorded in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Absorption {
    /// The observation already equals the local state.
    Aligned,
    /// The local state now follows the observation.
    Absorbed,
    /// The counterpart has no rule from the local state into the observation.
    NoRemoteRule,
    /// A rule exists but the bound guard returned `false`.
    GuardDeclined,
}

impl Absorption {
    pub fn is_absorbed(self) -> bool {
        matches!(self, Self::Absorbed)
    }
}
