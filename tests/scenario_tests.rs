//! End-to-end scenarios for paired server/client machines.

use rapport::builder::PeerMachineBuilder;
use rapport::peer::{is_converged, sync, Absorption, FailReason, PeerMachine};
use rapport::state_enum;
use rapport::TransitionMatching;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

state_enum! {
    enum RoundState {
        Idle,
        Running,
        EndResult,
        Stopped,
    }
}

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

#[test]
fn server_move_reaches_client_in_two_rounds() {
    let builder = PeerMachineBuilder::new()
        .server_permit(RoundState::Idle, RoundState::Running)
        .client_permit(RoundState::Running, RoundState::EndResult)
        .server_permit(RoundState::EndResult, RoundState::Stopped)
        .server_permit(RoundState::Running, RoundState::Stopped)
        .server_permit(RoundState::Idle, RoundState::Stopped);

    let mut client = builder.build_client();
    let mut server = builder.build_server();

    assert_eq!(server.state(), &RoundState::Idle);
    assert_eq!(server.remote_state(), &RoundState::Idle);
    assert_eq!(client.state(), &RoundState::Idle);
    assert_eq!(client.remote_state(), &RoundState::Idle);

    sync(&mut server, &mut client);

    assert!(is_converged(&server, &client));
    assert_eq!(server.state(), &RoundState::Idle);

    server.set_transition(RoundState::Running);

    assert_eq!(server.state(), &RoundState::Running);
    assert_eq!(server.remote_state(), &RoundState::Idle);
    assert_eq!(client.state(), &RoundState::Idle);
    assert_eq!(client.remote_state(), &RoundState::Idle);

    sync(&mut server, &mut client);

    assert_eq!(server.state(), &RoundState::Running);
    assert_eq!(server.remote_state(), &RoundState::Idle);
    assert_eq!(client.state(), &RoundState::Running);
    assert_eq!(client.remote_state(), &RoundState::Running);

    sync(&mut server, &mut client);

    assert_eq!(server.state(), &RoundState::Running);
    assert_eq!(server.remote_state(), &RoundState::Running);
    assert_eq!(client.state(), &RoundState::Running);
    assert_eq!(client.remote_state(), &RoundState::Running);
}

#[test]
fn client_chain_with_direct_rule_lands_server_directly() {
    let (mut server, mut client) = PeerMachineBuilder::new()
        .client_permit(RoundState::Idle, RoundState::Running)
        .client_permit_with(
            RoundState::Running,
            RoundState::EndResult,
            TransitionMatching::CanMismatch,
        )
        .client_permit(RoundState::Idle, RoundState::EndResult)
        .build_pair();

    assert!(client.try_transition(RoundState::Running).is_ok());
    assert!(!client.in_agreement());
    assert!(client.try_transition(RoundState::EndResult).is_ok());
    assert_eq!(server.state(), &RoundState::Idle);

    let report = sync(&mut server, &mut client);

    assert_eq!(report.server, Absorption::Absorbed);
    assert_eq!(server.state(), &RoundState::EndResult);
    assert_eq!(client.state(), &RoundState::EndResult);
    assert_eq!(client.remote_state(), &RoundState::EndResult);
}

#[test]
fn client_chain_without_direct_rule_is_not_bridged() {
    let (mut server, mut client) = PeerMachineBuilder::new()
        .client_permit(RoundState::Idle, RoundState::Running)
        .client_permit_with(
            RoundState::Running,
            RoundState::EndResult,
            TransitionMatching::CanMismatch,
        )
        .build_pair();

    client.set_transition(RoundState::Running);
    client.set_transition(RoundState::EndResult);

    for _ in 0..3 {
        let report = sync(&mut server, &mut client);
        assert_eq!(report.server, Absorption::NoRemoteRule);
    }

    assert_eq!(server.state(), &RoundState::Idle);
    assert_eq!(server.remote_state(), &RoundState::EndResult);
    assert_eq!(client.state(), &RoundState::EndResult);
    assert_eq!(client.remote_state(), &RoundState::Idle);
}

#[test]
fn match_rule_unblocks_after_sync() {
    let (mut server, mut client) = PeerMachineBuilder::new()
        .client_permit(RoundState::Idle, RoundState::Running)
        .client_permit(RoundState::Running, RoundState::EndResult)
        .build_pair();

    client.set_transition(RoundState::Running);
    let err = client.try_transition(RoundState::EndResult).unwrap_err();
    assert_eq!(err.kind(), FailReason::ServerClientStateMismatch);

    sync(&mut server, &mut client);

    assert!(is_converged(&server, &client));
    assert!(client.try_transition(RoundState::EndResult).is_ok());
}

#[test]
fn guarded_absorption_waits_for_condition() {
    let loaded = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&loaded);
    let (mut server, mut client) = PeerMachineBuilder::new()
        .server_permit(GameState::NotAvailable, GameState::Preparation)
        .client_guard(GameState::NotAvailable, GameState::Preparation, move || {
            flag.load(Ordering::SeqCst)
        })
        .build_pair();

    server.set_transition(GameState::Preparation);

    let report = sync(&mut server, &mut client);
    assert_eq!(report.client, Absorption::GuardDeclined);
    assert_eq!(client.state(), &GameState::NotAvailable);

    loaded.store(true, Ordering::SeqCst);

    let report = sync(&mut server, &mut client);
    assert_eq!(report.client, Absorption::Absorbed);

    sync(&mut server, &mut client);
    assert!(is_converged(&server, &client));
    assert_eq!(server.state(), &GameState::Preparation);
}

fn settle(server: &mut PeerMachine<GameState>, client: &mut PeerMachine<GameState>) {
    while sync(server, client).progressed() {}
}

#[test]
fn full_game_round() {
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
    assert_eq!(builder.validate(), Ok(()));

    let (mut server, mut client) = builder.build_pair();

    server.set_transition(GameState::Preparation);
    settle(&mut server, &mut client);
    assert!(is_converged(&server, &client));

    server.set_transition(GameState::Running);
    assert_eq!(
        server.try_transition(GameState::Result).unwrap_err().kind(),
        FailReason::NoRule
    );
    settle(&mut server, &mut client);
    assert_eq!(client.state(), &GameState::Running);

    client.set_transition(GameState::Result);
    settle(&mut server, &mut client);
    assert_eq!(server.state(), &GameState::Result);

    server.set_transition(GameState::ResultConfirmed);
    settle(&mut server, &mut client);
    server.set_transition(GameState::End);
    settle(&mut server, &mut client);

    assert!(is_converged(&server, &client));
    assert_eq!(client.state(), &GameState::End);
}

#[test]
fn server_can_abort_preparation_while_out_of_step() {
    let (mut server, mut client) = PeerMachineBuilder::new()
        .server_permit(GameState::NotAvailable, GameState::Preparation)
        .server_permit_with(
            GameState::Preparation,
            GameState::NotAvailable,
            TransitionMatching::CanMismatch,
        )
        .build_pair();

    server.set_transition(GameState::Preparation);
    assert!(!server.in_agreement());
    server.set_transition(GameState::NotAvailable);

    let report = sync(&mut server, &mut client);

    assert_eq!(report.client, Absorption::Aligned);
    assert!(is_converged(&server, &client));
}

#[test]
fn snapshot_survives_json_round_trip() {
    let builder = PeerMachineBuilder::new().server_permit(RoundState::Idle, RoundState::Running);
    let (mut server, mut client) = builder.build_pair();
    server.set_transition(RoundState::Running);
    sync(&mut server, &mut client);

    let json = client.snapshot().to_json().unwrap();
    let mut resumed = builder.build_client();
    resumed
        .restore(&rapport::snapshot::MachineSnapshot::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(resumed.state(), &RoundState::Running);
    assert_eq!(resumed.remote_state(), &RoundState::Running);
}

#[test]
fn machines_and_builders_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<PeerMachine<RoundState>>();
    assert_send_sync::<PeerMachineBuilder<RoundState>>();
}

#[test]
fn rule_tables_shared_across_threads() {
    let ready = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&ready);
    let builder = PeerMachineBuilder::new()
        .server_permit(RoundState::Idle, RoundState::Running)
        .client_guard(RoundState::Idle, RoundState::Running, move || {
            flag.load(Ordering::SeqCst)
        });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                let (mut server, mut client) = builder.build_pair();
                server.set_transition(RoundState::Running);
                sync(&mut server, &mut client);
                sync(&mut server, &mut client);
                (server, client)
            })
        })
        .collect();

    for handle in handles {
        let (server, client) = handle.join().unwrap();
        assert!(is_converged(&server, &client));
        assert_eq!(client.state(), &RoundState::Running);
    }
}
