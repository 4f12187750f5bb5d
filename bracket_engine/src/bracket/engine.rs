//! The bracket engine: roster management, bracket generation, and winner
//! propagation for a single-elimination tournament.

use super::config::BracketConfig;
use super::errors::{BracketError, BracketResult};
use super::models::{
    BracketStatus, Match, MatchId, MatchKey, Participant, ParticipantId, matches_in_round,
    round_count,
};
use super::shuffle::{RandomShuffler, Shuffler};
use super::snapshot::{BracketSnapshot, validate_snapshot};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// State container for one tournament.
///
/// The engine is single-writer: every mutation takes `&mut self`, reads and
/// commits its new state before returning, and leaves the state untouched
/// when it fails. Hosts that share an engine between callers must serialize
/// access themselves (a mutex or an owning task).
pub struct BracketEngine {
    config: BracketConfig,
    participants: Vec<Participant>,
    matches: BTreeMap<MatchKey, Match>,
    match_index: HashMap<MatchId, MatchKey>,
    round_count: u32,
    is_started: bool,
    shuffler: Box<dyn Shuffler + Send>,
}

impl BracketEngine {
    /// Create an engine with the default configuration and an OS-seeded shuffle
    pub fn new() -> Self {
        Self::from_parts(BracketConfig::default(), Box::new(RandomShuffler::new()))
    }

    /// Create an engine from a configuration.
    ///
    /// Uses a seeded shuffle when `config.shuffle_seed` is set.
    pub fn with_config(config: BracketConfig) -> BracketResult<Self> {
        match config.shuffle_seed {
            Some(seed) => Self::with_shuffler(config, RandomShuffler::seeded(seed)),
            None => Self::with_shuffler(config, RandomShuffler::new()),
        }
    }

    /// Create an engine with an explicit pairing source
    pub fn with_shuffler<S>(config: BracketConfig, shuffler: S) -> BracketResult<Self>
    where
        S: Shuffler + Send + 'static,
    {
        config
            .validate()
            .map_err(|e| BracketError::Configuration(e.to_string()))?;
        Ok(Self::from_parts(config, Box::new(shuffler)))
    }

    fn from_parts(config: BracketConfig, shuffler: Box<dyn Shuffler + Send>) -> Self {
        Self {
            config,
            participants: Vec::new(),
            matches: BTreeMap::new(),
            match_index: HashMap::new(),
            round_count: 0,
            is_started: false,
            shuffler,
        }
    }

    /// Replace the pairing source used by the next [`Self::initialize_bracket`]
    pub fn set_shuffler<S>(&mut self, shuffler: S)
    where
        S: Shuffler + Send + 'static,
    {
        self.shuffler = Box::new(shuffler);
    }

    pub fn config(&self) -> &BracketConfig {
        &self.config
    }

    // --- Roster -----------------------------------------------------------

    /// Register a participant at the end of the roster
    ///
    /// # Errors
    ///
    /// - `AlreadyStarted` once the bracket has been generated
    /// - `EmptyName` / `NameTooLong` for names outside the configured policy
    /// - `RosterFull` when `max_participants` is reached
    pub fn add_participant(&mut self, name: &str) -> BracketResult<Participant> {
        self.ensure_registering()?;

        let name = if self.config.trim_names {
            name.trim()
        } else {
            name
        };
        if name.is_empty() {
            return Err(BracketError::EmptyName);
        }

        let len = name.chars().count();
        if len > self.config.max_name_len {
            return Err(BracketError::NameTooLong {
                len,
                max: self.config.max_name_len,
            });
        }

        if let Some(max) = self.config.max_participants {
            if self.participants.len() >= max {
                return Err(BracketError::RosterFull { max });
            }
        }

        let participant = Participant::new(name, self.participants.len() as u32 + 1);
        debug!(
            "Registered participant {} '{}' as seed {}",
            participant.id, participant.name, participant.seed
        );
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Remove a participant and close the gap in the seeding
    pub fn remove_participant(&mut self, id: ParticipantId) -> BracketResult<Participant> {
        self.ensure_registering()?;

        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(BracketError::ParticipantNotFound(id))?;

        let removed = self.participants.remove(index);
        self.renumber_seeds();
        debug!("Removed participant {} '{}'", removed.id, removed.name);
        Ok(removed)
    }

    /// Replace the roster order.
    ///
    /// `ordered` must contain every current participant id exactly once.
    pub fn reorder_participants(&mut self, ordered: &[ParticipantId]) -> BracketResult<()> {
        self.ensure_registering()?;

        if ordered.len() != self.participants.len() {
            return Err(BracketError::NotAPermutation(format!(
                "expected {} ids, got {}",
                self.participants.len(),
                ordered.len()
            )));
        }

        let by_id: HashMap<ParticipantId, &Participant> =
            self.participants.iter().map(|p| (p.id, p)).collect();
        let mut seen = HashSet::with_capacity(ordered.len());
        let mut reordered = Vec::with_capacity(ordered.len());

        for id in ordered {
            let participant = by_id.get(id).ok_or_else(|| {
                BracketError::NotAPermutation(format!("unknown participant {id}"))
            })?;
            if !seen.insert(*id) {
                return Err(BracketError::NotAPermutation(format!(
                    "participant {id} listed twice"
                )));
            }
            reordered.push((*participant).clone());
        }

        self.participants = reordered;
        self.renumber_seeds();
        debug!("Reordered {} participants", self.participants.len());
        Ok(())
    }

    /// Move one participant to `new_index` (clamped to the end of the roster)
    pub fn move_participant(&mut self, id: ParticipantId, new_index: usize) -> BracketResult<()> {
        self.ensure_registering()?;

        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(BracketError::ParticipantNotFound(id))?;

        let participant = self.participants.remove(index);
        let new_index = new_index.min(self.participants.len());
        self.participants.insert(new_index, participant);
        self.renumber_seeds();
        Ok(())
    }

    fn renumber_seeds(&mut self) {
        for (index, participant) in self.participants.iter_mut().enumerate() {
            participant.seed = index as u32 + 1;
        }
    }

    fn ensure_registering(&self) -> BracketResult<()> {
        if self.is_started {
            return Err(BracketError::AlreadyStarted);
        }
        Ok(())
    }

    // --- Bracket generation ----------------------------------------------

    /// Generate the bracket from the current roster.
    ///
    /// Pairings come from a random permutation of the roster; seeds do not
    /// influence them. Round 1 pairs neighbours of the permutation, an odd
    /// roster leaves the last round-1 match as a bye. Later rounds start
    /// empty and fill as winners advance. Byes are resolved immediately.
    pub fn initialize_bracket(&mut self) -> BracketResult<()> {
        self.ensure_registering()?;

        let count = self.participants.len();
        if count < self.config.min_participants {
            return Err(BracketError::NotEnoughParticipants {
                needed: self.config.min_participants,
                current: count,
            });
        }

        let mut order = self.participants.clone();
        self.shuffler.shuffle(&mut order);
        self.ensure_permutation(&order)?;

        let rounds = round_count(count);
        let mut matches = BTreeMap::new();

        for (position, pair) in order.chunks(2).enumerate() {
            let mut m = Match::new(1, position as u32);
            m.participant1 = pair.first().cloned();
            m.participant2 = pair.get(1).cloned();
            matches.insert(m.key(), m);
        }

        for round in 2..=rounds {
            for position in 0..matches_in_round(count, round) {
                let m = Match::new(round, position as u32);
                matches.insert(m.key(), m);
            }
        }

        self.match_index = matches.values().map(|m| (m.id, m.key())).collect();
        self.matches = matches;
        self.round_count = rounds;
        self.is_started = true;

        let byes: Vec<MatchKey> = self
            .matches_in_round(1)
            .filter(|m| m.participant2.is_none())
            .map(Match::key)
            .collect();
        for key in byes {
            self.resolve_bye(key);
        }

        info!(
            "Bracket initialized: {} participants, {} rounds, {} matches",
            count,
            rounds,
            self.matches.len()
        );
        Ok(())
    }

    fn ensure_permutation(&self, order: &[Participant]) -> BracketResult<()> {
        let expected: HashSet<ParticipantId> = self.participants.iter().map(|p| p.id).collect();
        let actual: HashSet<ParticipantId> = order.iter().map(|p| p.id).collect();
        if order.len() != self.participants.len() || expected != actual {
            return Err(BracketError::Configuration(
                "shuffler did not return a permutation of the roster".to_string(),
            ));
        }
        Ok(())
    }

    // --- Results -----------------------------------------------------------

    /// Record the winner of a match and advance them one round.
    ///
    /// # Errors
    ///
    /// - `MatchNotFound` if the id is unknown
    /// - `MatchAlreadyDecided` if a winner is already recorded
    /// - `MatchNotReady` if a slot is still waiting on an earlier result
    /// - `NotInMatch` if `winner` is not one of the two occupants
    pub fn update_match(&mut self, match_id: MatchId, winner: ParticipantId) -> BracketResult<()> {
        let key = *self
            .match_index
            .get(&match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let current = self
            .matches
            .get(&key)
            .ok_or(BracketError::MatchNotFound(match_id))?;

        if current.is_decided() {
            return Err(BracketError::MatchAlreadyDecided(match_id));
        }
        if !current.is_ready() {
            return Err(BracketError::MatchNotReady(match_id));
        }
        let winner = current
            .occupant(winner)
            .cloned()
            .ok_or(BracketError::NotInMatch {
                match_id,
                participant: winner,
            })?;

        debug!("Match {} ({}) won by '{}'", match_id, key, winner.name);
        self.decide(key, winner);

        if let Some(champion) = self.champion() {
            info!("Champion decided: '{}'", champion.name);
        }
        Ok(())
    }

    /// Set a match's winner and move them into the next round's slot.
    ///
    /// Continues only through byes, which advance their lone occupant.
    fn decide(&mut self, key: MatchKey, winner: Participant) {
        let mut key = key;

        loop {
            if let Some(m) = self.matches.get_mut(&key) {
                m.winner = Some(winner.clone());
            }

            let next_key = key.next();
            let Some(next) = self.matches.get_mut(&next_key) else {
                break;
            };
            if key.feeds_first_slot() {
                next.participant1 = Some(winner.clone());
            } else {
                next.participant2 = Some(winner.clone());
            }

            if !self.is_bye(next_key) {
                break;
            }
            debug!("Walkover for '{}' at {}", winner.name, next_key);
            key = next_key;
        }
    }

    fn resolve_bye(&mut self, key: MatchKey) {
        let Some(occupant) = self.matches.get(&key).and_then(|m| m.participant1.clone()) else {
            return;
        };
        debug!("Walkover for '{}' at {}", occupant.name, key);
        self.decide(key, occupant);
    }

    /// A match with a single possible occupant.
    ///
    /// In round 1 that is a match without a second participant; later it is a
    /// match whose second feeder does not exist.
    fn is_bye(&self, key: MatchKey) -> bool {
        match key.feeders() {
            None => self
                .matches
                .get(&key)
                .is_some_and(|m| m.participant2.is_none()),
            Some((_, second)) => !self.matches.contains_key(&second),
        }
    }

    // --- Reset -------------------------------------------------------------

    /// Discard the roster and the bracket
    pub fn reset_tournament(&mut self) {
        self.participants.clear();
        self.matches.clear();
        self.match_index.clear();
        self.round_count = 0;
        self.is_started = false;
        info!("Tournament reset");
    }

    // --- Queries -----------------------------------------------------------

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// All matches, ordered by round then position
    pub fn matches(&self) -> impl Iterator<Item = &Match> + '_ {
        self.matches.values()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.match_index
            .get(&id)
            .and_then(|key| self.matches.get(key))
    }

    pub fn match_at(&self, round: u32, position: u32) -> Option<&Match> {
        self.matches.get(&MatchKey::new(round, position))
    }

    /// Matches of one round, ordered by position
    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &Match> + '_ {
        self.matches
            .range(MatchKey::new(round, 0)..=MatchKey::new(round, u32::MAX))
            .map(|(_, m)| m)
    }

    /// Matches with both participants known and no winner yet
    pub fn pending_matches(&self) -> impl Iterator<Item = &Match> + '_ {
        self.matches.values().filter(|m| m.is_ready())
    }

    /// Number of rounds in the generated bracket (0 before start)
    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    /// The single match of the last round
    pub fn final_match(&self) -> Option<&Match> {
        if !self.is_started {
            return None;
        }
        self.match_at(self.round_count, 0)
    }

    /// Winner of the final, once decided
    pub fn champion(&self) -> Option<&Participant> {
        self.final_match().and_then(|m| m.winner.as_ref())
    }

    pub fn status(&self) -> BracketStatus {
        if !self.is_started {
            BracketStatus::Registering
        } else if self.champion().is_some() {
            BracketStatus::Complete
        } else {
            BracketStatus::InProgress
        }
    }

    // --- Snapshots -----------------------------------------------------------

    /// Plain structured copy of the whole state
    pub fn snapshot(&self) -> BracketSnapshot {
        BracketSnapshot {
            participants: self.participants.clone(),
            matches: self.matches.values().cloned().collect(),
            is_started: self.is_started,
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// The snapshot is checked against every bracket invariant first; a
    /// snapshot that could not have been produced by the engine is rejected
    /// with `InvalidSnapshot`.
    pub fn restore<S>(
        snapshot: BracketSnapshot,
        config: BracketConfig,
        shuffler: S,
    ) -> BracketResult<Self>
    where
        S: Shuffler + Send + 'static,
    {
        let mut engine = Self::with_shuffler(config, shuffler)?;
        validate_snapshot(&snapshot)?;

        engine.round_count = if snapshot.is_started {
            round_count(snapshot.participants.len())
        } else {
            0
        };
        engine.participants = snapshot.participants;
        engine.matches = snapshot.matches.into_iter().map(|m| (m.key(), m)).collect();
        engine.match_index = engine.matches.values().map(|m| (m.id, m.key())).collect();
        engine.is_started = snapshot.is_started;

        debug!(
            "Restored bracket: {} participants, {} matches, status {}",
            engine.participants.len(),
            engine.matches.len(),
            engine.status()
        );
        Ok(engine)
    }
}

impl Default for BracketEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BracketEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BracketEngine")
            .field("config", &self.config)
            .field("participants", &self.participants)
            .field("matches", &self.matches)
            .field("round_count", &self.round_count)
            .field("is_started", &self.is_started)
            .finish_non_exhaustive()
    }
}
