//! Agreement policies attached to transition rules.

use serde::{Deserialize, Serialize};

/// How a rule relates to agreement between the local state and the last
/// observed remote state.
///
/// # Example
///
/// ```rust
/// use rapport::core::TransitionMatching;
///
/// assert!(TransitionMatching::Match.permits(true));
/// assert!(!TransitionMatching::Match.permits(false));
/// assert!(TransitionMatching::CanMismatch.permits(false));
/// assert!(TransitionMatching::Mismatch.permits(false));
/// assert_eq!(TransitionMatching::default(), TransitionMatching::Match);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionMatching {
    /// Usable only while local and remote states agree.
    #[default]
    Match,
    /// Usable regardless of agreement.
    CanMismatch,
    /// Usable only while local and remote states differ.
    Mismatch,
}

impl TransitionMatching {
    /// Whether a rule with this policy may fire given the current agreement.
    pub fn permits(self, in_agreement: bool) -> bool {
        match self {
            Self::Match => in_agreement,
            Self::CanMismatch => true,
            Self::Mismatch => !in_agreement,
        }
    }
}
