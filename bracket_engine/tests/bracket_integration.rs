//! Integration tests for the bracket lifecycle
//!
//! These tests drive an engine from registration through the final, then
//! exercise snapshots, restore, and reset.

use bracket_engine::bracket::{
    BracketConfig, BracketEngine, BracketError, BracketStatus, ErrorKind, IdentityShuffler,
    Participant, RandomShuffler,
};
use bracket_engine::export;

fn engine_with_names(names: &[&str]) -> BracketEngine {
    let mut engine =
        BracketEngine::with_shuffler(BracketConfig::default(), IdentityShuffler).unwrap();
    for name in names {
        engine.add_participant(name).unwrap();
    }
    engine
}

/// Decide every playable match in favour of its first participant until
/// nothing is left to play.
fn play_out_first_slot(engine: &mut BracketEngine) {
    loop {
        let Some(next) = engine.pending_matches().next().cloned() else {
            break;
        };
        let winner = next.participant1.as_ref().unwrap().id;
        engine.update_match(next.id, winner).unwrap();
    }
}

#[test]
fn test_eight_player_bracket_to_champion() {
    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut engine = engine_with_names(&names);
    engine.initialize_bracket().unwrap();

    assert_eq!(engine.round_count(), 3);
    assert_eq!(engine.matches_in_round(1).count(), 4);
    assert_eq!(engine.matches_in_round(2).count(), 2);
    assert_eq!(engine.matches_in_round(3).count(), 1);
    assert_eq!(engine.pending_matches().count(), 4);

    play_out_first_slot(&mut engine);

    // First slot always wins: a over b, then a over c, then a over e
    assert_eq!(engine.champion().unwrap().name, "a");
    assert_eq!(engine.status(), BracketStatus::Complete);
    assert!(engine.matches().all(|m| m.winner.is_some()));
}

#[test]
fn test_reversing_shuffler_controls_pairings() {
    let mut engine = engine_with_names(&["a", "b", "c", "d"]);
    engine.set_shuffler(|p: &mut [Participant]| p.reverse());
    engine.initialize_bracket().unwrap();

    let first = engine.match_at(1, 0).unwrap();
    assert_eq!(first.participant1.as_ref().unwrap().name, "d");
    assert_eq!(first.participant2.as_ref().unwrap().name, "c");

    // Pairing does not touch the roster order or seeds
    let seeds: Vec<_> = engine.participants().iter().map(|p| (p.name.as_str(), p.seed)).collect();
    assert_eq!(seeds, vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
}

#[test]
fn test_seeded_config_reproduces_pairings() {
    let config = BracketConfig {
        shuffle_seed: Some(2024),
        ..Default::default()
    };
    let names = ["a", "b", "c", "d", "e", "f", "g"];

    let pairings = |config: &BracketConfig| {
        let mut engine = BracketEngine::with_config(config.clone()).unwrap();
        for name in names {
            engine.add_participant(name).unwrap();
        }
        engine.initialize_bracket().unwrap();
        engine
            .matches_in_round(1)
            .map(|m| {
                (
                    m.participant1.as_ref().map(|p| p.name.clone()),
                    m.participant2.as_ref().map(|p| p.name.clone()),
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(pairings(&config), pairings(&config));
}

#[test]
fn test_five_players_byes_cascade() {
    let mut engine = engine_with_names(&["a", "b", "c", "d", "e"]);
    engine.initialize_bracket().unwrap();

    // R1P2 is a bye for "e"; R2P1 has no second feeder so "e" walks on
    assert_eq!(engine.match_at(1, 2).unwrap().winner.as_ref().unwrap().name, "e");
    assert_eq!(engine.match_at(2, 1).unwrap().winner.as_ref().unwrap().name, "e");
    let final_match = engine.match_at(3, 0).unwrap();
    assert_eq!(final_match.participant2.as_ref().unwrap().name, "e");
    assert!(final_match.participant1.is_none());

    play_out_first_slot(&mut engine);
    assert_eq!(engine.champion().unwrap().name, "a");
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let mut engine = engine_with_names(&["a", "b", "c", "d"]);
    engine.initialize_bracket().unwrap();
    let before = engine.snapshot();

    let final_id = engine.final_match().unwrap().id;
    let someone = engine.participants()[0].id;

    let errors = [
        engine.update_match(final_id, someone).unwrap_err(),
        engine.add_participant("late").unwrap_err(),
        engine.remove_participant(someone).unwrap_err(),
        engine.initialize_bracket().unwrap_err(),
    ];
    for err in &errors {
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed, "{err}");
    }
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_restore_round_trip_and_continue() {
    let mut engine = engine_with_names(&["a", "b", "c", "d", "e", "f"]);
    engine.initialize_bracket().unwrap();
    let opener = engine.match_at(1, 0).unwrap().clone();
    engine
        .update_match(opener.id, opener.participant2.as_ref().unwrap().id)
        .unwrap();

    let json = export::to_json(&engine.snapshot()).unwrap();
    let snapshot = export::from_json(&json).unwrap();
    let mut restored =
        BracketEngine::restore(snapshot, BracketConfig::default(), IdentityShuffler).unwrap();

    assert_eq!(restored.snapshot(), engine.snapshot());
    assert_eq!(restored.round_count(), 3);
    assert_eq!(restored.status(), BracketStatus::InProgress);

    // Decided matches stay decided after restore
    let err = restored
        .update_match(opener.id, opener.participant1.as_ref().unwrap().id)
        .unwrap_err();
    assert!(matches!(err, BracketError::MatchAlreadyDecided(_)));

    play_out_first_slot(&mut restored);
    assert!(restored.champion().is_some());
}

#[test]
fn test_restore_rejects_tampered_snapshot() {
    let mut engine = engine_with_names(&["a", "b", "c", "d"]);
    engine.initialize_bracket().unwrap();

    // Two matches claiming R1P0
    let mut snapshot = engine.snapshot();
    snapshot.matches[1].position = 0;

    let err = BracketEngine::restore(snapshot, BracketConfig::default(), RandomShuffler::new())
        .unwrap_err();
    assert!(matches!(err, BracketError::InvalidSnapshot(_)));
}

#[test]
fn test_restore_registering_snapshot_accepts_roster_changes() {
    let engine = engine_with_names(&["a", "b"]);
    let mut restored =
        BracketEngine::restore(engine.snapshot(), BracketConfig::default(), IdentityShuffler)
            .unwrap();

    assert!(!restored.is_started());
    restored.add_participant("c").unwrap();
    assert_eq!(restored.participants()[2].seed, 3);
}

#[test]
fn test_reset_after_completion() {
    let mut engine = engine_with_names(&["a", "b", "c"]);
    engine.initialize_bracket().unwrap();
    play_out_first_slot(&mut engine);
    assert!(engine.champion().is_some());

    engine.reset_tournament();
    assert!(!engine.is_started());
    assert!(engine.participants().is_empty());
    assert_eq!(engine.matches().count(), 0);
    assert!(engine.champion().is_none());

    // The engine is reusable after reset
    engine.add_participant("x").unwrap();
    engine.add_participant("y").unwrap();
    engine.initialize_bracket().unwrap();
    assert_eq!(engine.match_count(), 1);
}

#[test]
fn test_drag_and_drop_reorder_then_start() {
    let mut engine = engine_with_names(&["a", "b", "c", "d"]);
    let d = engine.participants()[3].id;
    engine.move_participant(d, 0).unwrap();

    let order: Vec<_> = engine.participants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["d", "a", "b", "c"]);

    engine.initialize_bracket().unwrap();
    let opener = engine.match_at(1, 0).unwrap();
    assert_eq!(opener.participant1.as_ref().unwrap().name, "d");
}
