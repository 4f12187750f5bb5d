//! # Bracket Engine
//!
//! A single-elimination tournament engine: register participants, generate
//! a randomly paired bracket, record match winners, and let winners advance
//! round by round until a champion remains.
//!
//! ## Architecture
//!
//! A tournament moves through three phases:
//!
//! - **Registering**: participants are added, removed, and reordered; seeds
//!   follow roster order
//! - **InProgress**: the roster is frozen and match results flow through the
//!   bracket tree
//! - **Complete**: the final has a winner
//!
//! `reset_tournament` returns an engine to an empty registering state from
//! any phase.
//!
//! ## Core Modules
//!
//! - [`bracket`]: the engine, its models, configuration, and errors
//! - [`export`]: JSON projection of engine snapshots
//! - [`registry`]: host-side collection of tournaments behind a creation gate
//!
//! ## Example
//!
//! ```
//! use bracket_engine::BracketEngine;
//!
//! let mut engine = BracketEngine::new();
//! engine.add_participant("Ada")?;
//! engine.add_participant("Grace")?;
//! engine.initialize_bracket()?;
//!
//! let final_match = engine.final_match().unwrap().clone();
//! let winner = final_match.participant1.as_ref().unwrap().id;
//! engine.update_match(final_match.id, winner)?;
//! assert!(engine.champion().is_some());
//! # Ok::<(), bracket_engine::BracketError>(())
//! ```

/// Bracket generation, result recording, and snapshots.
pub mod bracket;

/// JSON export of snapshots.
pub mod export;

/// Multiple tournaments and the creation gate.
pub mod registry;

pub use bracket::{
    BracketConfig, BracketEngine, BracketError, BracketResult, BracketSnapshot, BracketStatus,
    ErrorKind, Match, MatchId, Participant, ParticipantId,
};
