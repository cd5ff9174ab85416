//! Peer roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the pair a machine plays. Fixed for the machine's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The authoritative peer.
    Server,
    /// The dependent peer.
    Client,
}

impl Role {
    /// The role on the other end of the pair.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Server => Self::Client,
            Self::Client => Self::Server,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => f.write_str("server"),
            Self::Client => f.write_str("client"),
        }
    }
}
