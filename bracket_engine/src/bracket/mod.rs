//! Single-elimination bracket engine.
//!
//! This module provides:
//! - Participant registration with positional seeds
//! - Random pairing and bracket generation for any roster of 2+
//! - Winner recording with propagation into the next round
//! - Automatic walkovers for byes
//! - Snapshots of the complete state
//!
//! ## Bracket shape
//!
//! For `N` participants the bracket has `ceil(log2(N))` rounds. Round `r`
//! holds `ceil(N / 2^r)` matches; the winner of the match at position `p`
//! moves into position `p / 2` of the next round, taking the first slot when
//! `p` is even and the second slot when it is odd. A match that can only
//! ever receive one participant is a bye, and its occupant advances at once.
//!
//! ## Example
//!
//! ```
//! use bracket_engine::bracket::{BracketConfig, BracketEngine, IdentityShuffler};
//!
//! let mut engine = BracketEngine::with_shuffler(BracketConfig::default(), IdentityShuffler)?;
//! for name in ["Ada", "Grace", "Linus"] {
//!     engine.add_participant(name)?;
//! }
//! engine.initialize_bracket()?;
//!
//! // Linus drew the bye and already waits in the final
//! let opener = engine.match_at(1, 0).unwrap().clone();
//! let ada = opener.participant1.as_ref().unwrap().id;
//! engine.update_match(opener.id, ada)?;
//!
//! let final_match = engine.final_match().unwrap().clone();
//! engine.update_match(final_match.id, ada)?;
//! assert_eq!(engine.champion().unwrap().name, "Ada");
//! # Ok::<(), bracket_engine::bracket::BracketError>(())
//! ```

pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod shuffle;
pub mod snapshot;

pub use config::{BracketConfig, ConfigError};
pub use engine::BracketEngine;
pub use errors::{BracketError, BracketResult, ErrorKind};
pub use models::{
    BracketStatus, Match, MatchId, MatchKey, Participant, ParticipantId, matches_in_round,
    round_count,
};
pub use shuffle::{IdentityShuffler, RandomShuffler, Shuffler};
pub use snapshot::{BracketSnapshot, validate_snapshot};
