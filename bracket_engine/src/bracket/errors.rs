//! Bracket error types.

use super::models::{MatchId, ParticipantId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a [`BracketError`].
///
/// Hosts use this to map engine failures onto their own surface
/// (a UI message, an HTTP 4xx, an exit code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    PreconditionFailed,
    NotFound,
}

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// Participant name is empty after trimming
    #[error("participant name must not be empty")]
    EmptyName,

    /// Participant name exceeds the configured limit
    #[error("participant name too long: {len} characters, max {max}")]
    NameTooLong { len: usize, max: usize },

    /// Reorder input is not a permutation of the current roster
    #[error("new order is not a permutation of the roster: {0}")]
    NotAPermutation(String),

    /// Winner does not occupy a slot of the match
    #[error("participant {participant} is not playing in match {match_id}")]
    NotInMatch {
        match_id: MatchId,
        participant: ParticipantId,
    },

    /// Snapshot breaks a bracket invariant
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Engine configuration is unusable
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Export/import failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Roster is frozen once the bracket is generated
    #[error("bracket already started")]
    AlreadyStarted,

    #[error("not enough participants: need {needed}, have {current}")]
    NotEnoughParticipants { needed: usize, current: usize },

    #[error("roster is full ({max} participants)")]
    RosterFull { max: usize },

    #[error("match {0} already has a winner")]
    MatchAlreadyDecided(MatchId),

    /// One or both slots are still waiting on earlier results
    #[error("match {0} is waiting for participants")]
    MatchNotReady(MatchId),

    #[error("participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("match not found: {0}")]
    MatchNotFound(MatchId),
}

impl BracketError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::EmptyName
            | BracketError::NameTooLong { .. }
            | BracketError::NotAPermutation(_)
            | BracketError::NotInMatch { .. }
            | BracketError::InvalidSnapshot(_)
            | BracketError::Configuration(_)
            | BracketError::Serialization(_) => ErrorKind::InvalidArgument,
            BracketError::AlreadyStarted
            | BracketError::NotEnoughParticipants { .. }
            | BracketError::RosterFull { .. }
            | BracketError::MatchAlreadyDecided(_)
            | BracketError::MatchNotReady(_) => ErrorKind::PreconditionFailed,
            BracketError::ParticipantNotFound(_) | BracketError::MatchNotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
