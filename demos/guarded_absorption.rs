//! Guarded Absorption
//!
//! This example shows a client that refuses to follow the server into
//! `Playing` until its level has finished loading, and a timeout hook an
//! outside scheduler could fire.
//!
//! Run with: cargo run --example guarded_absorption

use rapport::builder::PeerMachineBuilder;
use rapport::peer::{is_converged, sync};
use rapport::state_enum;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

state_enum! {
    enum LobbyState {
        Lobby,
        Playing,
        Disconnected,
    }
}

fn main() {
    println!("=== Guarded Absorption Example ===\n");

    let level_loaded = Arc::new(AtomicBool::new(false));
    let loaded = Arc::clone(&level_loaded);

    let builder = PeerMachineBuilder::new()
        .server_permit(LobbyState::Lobby, LobbyState::Playing)
        .client_guard(LobbyState::Lobby, LobbyState::Playing, move || {
            loaded.load(Ordering::SeqCst)
        })
        .client_timeout(Duration::from_secs(30), LobbyState::Disconnected);

    let (mut server, mut client) = builder.build_pair();

    server.set_transition(LobbyState::Playing);

    let report = sync(&mut server, &mut client);
    println!("Level not loaded: client {:?} ({:?})", client.state(), report.client);

    level_loaded.store(true, Ordering::SeqCst);

    let report = sync(&mut server, &mut client);
    println!("Level loaded:     client {:?} ({:?})", client.state(), report.client);

    sync(&mut server, &mut client);
    println!("Converged: {}", is_converged(&server, &client));

    if let Some(policy) = client.timeout() {
        println!("\nClient would give up after {:?}", policy.after);
    }
    let mut stale = builder.build_client();
    if let Some(forced) = stale.apply_timeout() {
        println!("A stale client forced to {forced:?}");
    }

    println!("\n=== Example Complete ===");
}
