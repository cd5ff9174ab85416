//! Rapport: paired server/client state machines
//!
//! Two peers, an authoritative server and a dependent client, advance
//! through the same closed set of states. Each side validates its own moves
//! against its own rules, and reconciles against the other side's last
//! observed state using the other side's rules.
//!
//! # Core Concepts
//!
//! - **State**: Closed, caller-defined set via the `State` trait
//! - **Rules**: `(from, to, matching)` triples per role
//! - **Matching**: Whether a rule needs local/remote agreement, disagreement, or neither
//! - **Guards**: Predicates that defer absorbing a remote move
//! - **Sync**: One round of server-absorbs-client, client-absorbs-server
//!
//! # Example
//!
//! ```rust
//! use rapport::builder::PeerMachineBuilder;
//! use rapport::peer::{is_converged, sync};
//! use rapport::state_enum;
//!
//! state_enum! {
//!     enum RoundState {
//!         Idle,
//!         Running,
//!         EndResult,
//!         Stopped,
//!     }
//! }
//!
//! let builder = PeerMachineBuilder::new()
//!     .server_permit(RoundState::Idle, RoundState::Running);
//! let (mut server, mut client) = builder.build_pair();
//!
//! server.set_transition(RoundState::Running);
//! assert_eq!(server.remote_state(), &RoundState::Idle);
//!
//! sync(&mut server, &mut client);
//! assert_eq!(client.state(), &RoundState::Running);
//! assert_eq!(server.remote_state(), &RoundState::Idle);
//!
//! sync(&mut server, &mut client);
//! assert!(is_converged(&server, &client));
//! ```

pub mod builder;
pub mod core;
pub mod peer;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, PeerMachineBuilder};
pub use core::{RemoteGuard, Role, State, TransitionMatching, TransitionRule};
pub use peer::{sync, try_sync, Absorption, FailReason, PeerMachine, TransitionError};
