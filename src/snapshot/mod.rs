//! Serializable snapshots of a peer machine's mutable state.
//!
//! A snapshot holds the role, the local state and the last observed remote
//! state. Rules and guards are never included: they come from the builder
//! that produced the machine a snapshot is restored into.

use crate::core::{Role, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Point-in-time copy of a machine's role and both state slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Role of the machine the snapshot was taken from
    pub role: Role,

    /// Local state at capture time
    pub state: S,

    /// Last observed remote state at capture time
    pub remote_state: S,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl<S: State> MachineSnapshot<S> {
    pub fn new(role: Role, state: S, remote_state: S) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            role,
            state,
            remote_state,
            taken_at: Utc::now(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from a JSON string, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        Ok(snapshot)
    }
}
