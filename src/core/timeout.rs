//! Timeout hook points.
//!
//! The engine never measures time. A policy only records how long a role is
//! expected to wait and where it should land when an external scheduler
//! decides the deadline has passed.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadline and fallback state for one role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TimeoutPolicy<S: State> {
    /// How long the caller should wait before forcing the fallback
    pub after: Duration,
    /// State to force when the deadline passes
    pub fallback: S,
}

impl<S: State> TimeoutPolicy<S> {
    pub fn new(after: Duration, fallback: S) -> Self {
        Self { after, fallback }
    }

    /// Whether `elapsed` has reached the deadline (pure)
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.after
    }
}
