//! Builder API for constructing peer machine pairs.
//!
//! This module provides the fluent [`PeerMachineBuilder`] that turns one
//! declarative rule set into coupled server and client machines, plus the
//! [`state_enum!`](crate::state_enum) macro for defining state sets.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::PeerMachineBuilder;
