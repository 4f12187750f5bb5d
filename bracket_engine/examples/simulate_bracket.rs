//! Bracket Simulation Example
//!
//! Registers a small roster, generates a bracket, and plays it out round by
//! round. Run with `RUST_LOG=debug` to see every result and walkover.

use bracket_engine::bracket::{BracketConfig, BracketEngine, BracketError, Match, Participant};
use bracket_engine::export;

fn next_pending(engine: &BracketEngine) -> Option<Match> {
    engine.pending_matches().next().cloned()
}

fn slot_name(slot: &Option<Participant>) -> &str {
    slot.as_ref().map_or("TBD", |p| p.name.as_str())
}

fn main() -> Result<(), BracketError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Single-Elimination Bracket Example ===\n");

    let config = BracketConfig {
        shuffle_seed: Some(1985),
        ..Default::default()
    };
    let mut engine = BracketEngine::with_config(config)?;

    for name in ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret"] {
        let participant = engine.add_participant(name)?;
        println!("Registered {participant}");
    }

    engine.initialize_bracket()?;
    println!("\nBracket has {} rounds\n", engine.round_count());

    for round in 1..=engine.round_count() {
        println!("Round {round}:");
        for m in engine.matches_in_round(round) {
            println!("  {} vs {}", slot_name(&m.participant1), slot_name(&m.participant2));
        }
    }

    // The lower seed wins every match
    while let Some(m) = next_pending(&engine) {
        let (Some(p1), Some(p2)) = (&m.participant1, &m.participant2) else {
            break;
        };
        let (winner, loser) = if p1.seed < p2.seed { (p1, p2) } else { (p2, p1) };
        println!("{}: {} beats {}", m.key(), winner.name, loser.name);
        engine.update_match(m.id, winner.id)?;
    }

    if let Some(champion) = engine.champion() {
        println!("\nChampion: {}", champion.name);
    }

    println!("\nSnapshot:\n{}", export::to_json_pretty(&engine.snapshot())?);
    Ok(())
}
