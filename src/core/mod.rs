//! Core data types shared by both peers.
//!
//! This module contains the immutable pieces of a paired state machine:
//! - State definitions via the `State` trait
//! - Roles and agreement policies
//! - Transition rules and their ordered tables
//! - Guard predicates and timeout hook points
//!
//! Nothing in this module mutates after construction.

mod guard;
mod matching;
mod role;
mod rule;
mod state;
mod timeout;

pub use guard::RemoteGuard;
pub use matching::TransitionMatching;
pub use role::Role;
pub use rule::{RuleTable, TransitionRule};
pub use state::State;
pub use timeout::TimeoutPolicy;
