//! Core State trait for peer machine states.
//!
//! States are opaque values from a closed, caller-defined set. The engine
//! only ever compares them for equality and replaces them wholesale.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for the states both peers advance through.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the local and remote slots
/// - `PartialEq`: rule lookup and agreement checks compare states
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: states appear in snapshots
/// - `Send` + `Sync`: rule tables holding states are shared across threads
///
/// # Example
///
/// ```rust
/// use rapport::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
/// enum RoundState {
///     #[default]
///     Idle,
///     Running,
///     Stopped,
/// }
///
/// impl State for RoundState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running => "Running",
///             Self::Stopped => "Stopped",
///         }
///     }
/// }
///
/// assert_eq!(RoundState::default().name(), "Idle");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Running,
        EndResult,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::EndResult => "EndResult",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Running.name(), "Running");
        assert_eq!(TestState::EndResult.name(), "EndResult");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Running;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Running, TestState::Running.clone());
        assert_ne!(TestState::Idle, TestState::Running);
    }
}
