//! Guard predicates consulted when absorbing a remote state.
//!
//! A guard is bound to one `(from, to)` pair for one role. It never affects
//! local transition attempts, only whether an observed remote move is
//! adopted yet.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Predicate gating absorption of the remote move `from -> to`.
///
/// The predicate takes no arguments: it typically reads some external
/// condition (a flag, a counter, a loaded asset) that the caller owns.
/// It is re-evaluated every time the same remote move is reported again.
///
/// # Example
///
/// ```rust
/// use rapport::core::{RemoteGuard, State};
/// use serde::{Deserialize, Serialize};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Lobby,
///     Playing,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Lobby => "Lobby",
///             Self::Playing => "Playing",
///         }
///     }
/// }
///
/// let loaded = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&loaded);
/// let guard = RemoteGuard::new(Phase::Lobby, Phase::Playing, move || {
///     flag.load(Ordering::SeqCst)
/// });
///
/// assert!(!guard.check());
/// loaded.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
pub struct RemoteGuard<S: State> {
    /// The local state the remote move starts from
    pub from: S,
    /// The observed remote state
    pub to: S,
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl<S: State> RemoteGuard<S> {
    /// Create a guard from a predicate closure.
    ///
    /// The predicate must be thread-safe (Send + Sync) because guard lists
    /// are shared between every machine built from the same builder.
    pub fn new<F>(from: S, to: S, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            from,
            to,
            predicate: Arc::new(predicate),
        }
    }

    /// Check if this guard is bound to the given move (pure)
    pub fn covers(&self, from: &S, to: &S) -> bool {
        self.from == *from && self.to == *to
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl<S: State> Clone for RemoteGuard<S> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for RemoteGuard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteGuard")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
