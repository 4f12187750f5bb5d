//! Bracket data models: participants, matches, and their identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique participant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Unique match identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for MatchId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A registered participant.
///
/// The seed is the participant's 1-based position in the roster and is
/// renumbered whenever the roster changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub seed: u32,
}

impl Participant {
    /// Create a participant with a fresh identifier
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
            seed,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.seed, self.name)
    }
}

/// Location of a match in the bracket tree.
///
/// Ordering is by round first, then position, so a sorted collection of keys
/// walks the bracket from the first round to the final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey {
    /// Round number (1-indexed)
    pub round: u32,
    /// Slot within the round (0-indexed)
    pub position: u32,
}

impl MatchKey {
    pub fn new(round: u32, position: u32) -> Self {
        Self { round, position }
    }

    /// The match this one's winner advances into
    pub fn next(self) -> Self {
        Self {
            round: self.round + 1,
            position: self.position / 2,
        }
    }

    /// Whether this match's winner fills the first slot of the next match
    pub fn feeds_first_slot(self) -> bool {
        self.position % 2 == 0
    }

    /// The two previous-round matches that feed this one.
    ///
    /// Returns `None` for round 1.
    pub fn feeders(self) -> Option<(Self, Self)> {
        if self.round <= 1 {
            return None;
        }
        let round = self.round - 1;
        Some((
            Self::new(round, self.position * 2),
            Self::new(round, self.position * 2 + 1),
        ))
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}P{}", self.round, self.position)
    }
}

/// A single match in the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    pub position: u32,
    pub participant1: Option<Participant>,
    pub participant2: Option<Participant>,
    pub winner: Option<Participant>,
}

impl Match {
    /// Create an empty match at the given location
    pub fn new(round: u32, position: u32) -> Self {
        Self {
            id: MatchId::new(),
            round,
            position,
            participant1: None,
            participant2: None,
            winner: None,
        }
    }

    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.round, self.position)
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both slots are filled and no winner has been recorded
    pub fn is_ready(&self) -> bool {
        self.participant1.is_some() && self.participant2.is_some() && self.winner.is_none()
    }

    /// Look up a slot occupant by id
    pub fn occupant(&self, id: ParticipantId) -> Option<&Participant> {
        [&self.participant1, &self.participant2]
            .into_iter()
            .flatten()
            .find(|p| p.id == id)
    }

    /// Whether the given participant occupies either slot
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.occupant(id).is_some()
    }
}

/// Lifecycle of a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    /// Accepting roster changes
    Registering,
    /// Bracket generated, champion not yet decided
    InProgress,
    /// Final match decided
    Complete,
}

impl fmt::Display for BracketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketStatus::Registering => write!(f, "registering"),
            BracketStatus::InProgress => write!(f, "in_progress"),
            BracketStatus::Complete => write!(f, "complete"),
        }
    }
}

/// Number of rounds needed to reduce `participants` entrants to one
/// champion, i.e. `ceil(log2(participants))`.
pub fn round_count(participants: usize) -> u32 {
    if participants < 2 {
        return 0;
    }
    usize::BITS - (participants - 1).leading_zeros()
}

/// Number of matches in `round` for a bracket of `participants` entrants,
/// i.e. `ceil(participants / 2^round)`.
pub fn matches_in_round(participants: usize, round: u32) -> usize {
    if round == 0 || round > round_count(participants) {
        return 0;
    }
    match 1usize.checked_shl(round) {
        Some(divisor) => participants.div_ceil(divisor),
        None => 1,
    }
}
