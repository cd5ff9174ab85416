//! One bidirectional exchange between a server and a client machine.

use crate::core::{Role, State};
use crate::peer::machine::PeerMachine;
use crate::peer::transition::Absorption;
use thiserror::Error;

/// Role misuse when pairing machines for a sync round.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("Server state machine is not a server (found {found})")]
    NotServer { found: Role },

    #[error("Client state machine is not a client (found {found})")]
    NotClient { found: Role },
}

/// What each side did during one sync round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub server: Absorption,
    pub client: Absorption,
}

impl SyncReport {
    /// Whether either side adopted the other's state this round.
    pub fn progressed(&self) -> bool {
        self.server.is_absorbed() || self.client.is_absorbed()
    }
}

/// Run one sync round, rejecting swapped roles.
///
/// The server absorbs the client's state first, then the client absorbs the
/// server's (possibly just updated) state. Each side reads only the other's
/// local state, so a chain of moves may need several rounds to converge.
/// The round is not atomic: a `try_transition` on either machine between
/// the two absorptions is applied under the normal rules.
pub fn try_sync<S: State>(
    server: &mut PeerMachine<S>,
    client: &mut PeerMachine<S>,
) -> Result<SyncReport, SyncError> {
    if !server.is_server() {
        return Err(SyncError::NotServer {
            found: server.role(),
        });
    }
    if !client.is_client() {
        return Err(SyncError::NotClient {
            found: client.role(),
        });
    }

    let server_outcome = server.report_remote_state(client.state().clone());
    let client_outcome = client.report_remote_state(server.state().clone());

    Ok(SyncReport {
        server: server_outcome,
        client: client_outcome,
    })
}

/// Run one sync round.
///
/// Same ordering as [`try_sync`]: server absorbs client, then client
/// absorbs server. The round is not atomic: a `try_transition` on either
/// machine between the two absorptions is applied under the normal rules.
///
/// # Panics
///
/// Panics if `server` is not a server machine or `client` is not a client
/// machine. Pairing the wrong roles is a programming error.
#[track_caller]
pub fn sync<S: State>(server: &mut PeerMachine<S>, client: &mut PeerMachine<S>) -> SyncReport {
    match try_sync(server, client) {
        Ok(report) => report,
        Err(err) => panic!("{err}"),
    }
}

/// Whether both machines agree on one state in all four slots.
pub fn is_converged<S: State>(server: &PeerMachine<S>, client: &PeerMachine<S>) -> bool {
    server.state() == server.remote_state()
        && server.state() == client.state()
        && client.state() == client.remote_state()
}
