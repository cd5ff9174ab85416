//! Round Handshake
//!
//! This example walks a server and a client through one game round,
//! printing all four state slots after every step.
//!
//! Key concepts:
//! - One rule set builds both roles
//! - Local moves need agreement unless the rule says otherwise
//! - Each sync round carries a state one hop across
//!
//! Run with: cargo run --example round_handshake

use rapport::builder::PeerMachineBuilder;
use rapport::peer::{is_converged, sync, PeerMachine};
use rapport::state_enum;
use rapport::TransitionMatching;

state_enum! {
    enum GameState {
        NotAvailable,
        Preparation,
        Running,
        Result,
        ResultConfirmed,
        End,
    }
}

fn show(label: &str, server: &PeerMachine<GameState>, client: &PeerMachine<GameState>) {
    println!(
        "{label:<28} server {:?} (sees {:?}) | client {:?} (sees {:?})",
        server.state(),
        server.remote_state(),
        client.state(),
        client.remote_state()
    );
}

fn main() {
    println!("=== Round Handshake Example ===\n");

    let builder = PeerMachineBuilder::new()
        .server_permit(GameState::NotAvailable, GameState::Preparation)
        .server_permit_with(
            GameState::Preparation,
            GameState::NotAvailable,
            TransitionMatching::CanMismatch,
        )
        .server_permit(GameState::Preparation, GameState::Running)
        .client_permit(GameState::Running, GameState::Result)
        .server_permit(GameState::Result, GameState::ResultConfirmed)
        .server_permit(GameState::Result, GameState::End)
        .server_permit(GameState::ResultConfirmed, GameState::End);

    if let Err(err) = builder.validate() {
        println!("Rule set problem: {err}");
        return;
    }

    let (mut server, mut client) = builder.build_pair();
    show("start", &server, &client);

    server.set_transition(GameState::Preparation);
    show("server -> Preparation", &server, &client);

    match server.try_transition(GameState::Running) {
        Ok(()) => show("server -> Running", &server, &client),
        Err(err) => println!("server -> Running refused: {err}"),
    }

    while !is_converged(&server, &client) {
        sync(&mut server, &mut client);
        show("sync", &server, &client);
    }

    server.set_transition(GameState::Running);
    sync(&mut server, &mut client);
    sync(&mut server, &mut client);
    show("running on both sides", &server, &client);

    client.set_transition(GameState::Result);
    show("client -> Result", &server, &client);
    sync(&mut server, &mut client);
    show("sync", &server, &client);

    let next: Vec<_> = server
        .own_rules()
        .outgoing(server.state())
        .map(|rule| format!("{:?} ({:?})", rule.to, rule.matching))
        .collect();
    println!("server may now move to: {}", next.join(", "));

    server.set_transition(GameState::End);
    sync(&mut server, &mut client);
    sync(&mut server, &mut client);
    show("end", &server, &client);

    println!("\n=== Example Complete ===");
}
