//! Mutable peer machines and the sync driver.
//!
//! This module is the "imperative shell" around the immutable rule tables
//! in [`core`](crate::core): a [`PeerMachine`] owns the two state slots of
//! one role, and [`sync`] runs one exchange between a server and a client.
//!
//! # Key Concepts
//!
//! - **Local transition**: validated against the role's own rules and the
//!   agreement policy, never against guards
//! - **Absorption**: adopting the counterpart's observed state when the
//!   counterpart's rules and this role's guard allow it
//! - **Sync round**: server absorbs client, then client absorbs server

mod machine;
mod sync;
mod transition;

pub use machine::PeerMachine;
pub use sync::{is_converged, sync, try_sync, SyncError, SyncReport};
pub use transition::{Absorption, FailReason, TransitionError};
