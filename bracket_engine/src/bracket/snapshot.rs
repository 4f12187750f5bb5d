//! Plain-data projection of an engine's state.

use super::errors::{BracketError, BracketResult};
use super::models::{Match, MatchKey, Participant, ParticipantId, matches_in_round, round_count};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Complete engine state: roster, matches, and whether the bracket started.
///
/// Matches are listed in round/position order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub participants: Vec<Participant>,
    pub matches: Vec<Match>,
    pub is_started: bool,
}

impl BracketSnapshot {
    /// Winner of the final, if decided
    pub fn champion(&self) -> Option<&Participant> {
        let last_round = self.matches.iter().map(|m| m.round).max()?;
        self.matches
            .iter()
            .find(|m| m.round == last_round)
            .and_then(|m| m.winner.as_ref())
    }
}

fn invalid(reason: impl Into<String>) -> BracketError {
    BracketError::InvalidSnapshot(reason.into())
}

/// Check a snapshot against the bracket invariants.
///
/// Accepts exactly the states the engine itself can reach: contiguous seeds,
/// a complete tree shaped for the roster size, winners drawn from their own
/// match, every filled later-round slot backed by the feeder's winner, and
/// byes already walked over.
pub fn validate_snapshot(snapshot: &BracketSnapshot) -> BracketResult<()> {
    let roster = validate_roster(&snapshot.participants)?;

    if !snapshot.is_started {
        if !snapshot.matches.is_empty() {
            return Err(invalid("matches present before the bracket started"));
        }
        return Ok(());
    }

    let count = snapshot.participants.len();
    if count < 2 {
        return Err(invalid(format!("started bracket with {count} participants")));
    }

    let mut by_key: BTreeMap<MatchKey, &Match> = BTreeMap::new();
    let mut match_ids = HashSet::new();
    for m in &snapshot.matches {
        if !match_ids.insert(m.id) {
            return Err(invalid(format!("duplicate match id {}", m.id)));
        }
        if by_key.insert(m.key(), m).is_some() {
            return Err(invalid(format!("two matches at {}", m.key())));
        }
    }

    let rounds = round_count(count);
    for round in 1..=rounds {
        let expected = matches_in_round(count, round);
        for position in 0..expected {
            if !by_key.contains_key(&MatchKey::new(round, position as u32)) {
                return Err(invalid(format!("missing match R{round}P{position}")));
            }
        }
    }
    let expected_total: usize = (1..=rounds).map(|r| matches_in_round(count, r)).sum();
    if by_key.len() != expected_total {
        return Err(invalid(format!(
            "expected {expected_total} matches for {count} participants, found {}",
            by_key.len()
        )));
    }

    let mut first_round_entrants = HashSet::new();
    for (key, m) in &by_key {
        for slot in [&m.participant1, &m.participant2, &m.winner]
            .into_iter()
            .flatten()
        {
            if roster.get(&slot.id) != Some(&slot) {
                return Err(invalid(format!(
                    "{key} references participant {} not on the roster",
                    slot.id
                )));
            }
        }

        if let Some(winner) = &m.winner {
            if !m.involves(winner.id) {
                return Err(invalid(format!("{key} winner is not one of its participants")));
            }
        }

        match key.feeders() {
            None => {
                let Some(first) = &m.participant1 else {
                    return Err(invalid(format!("{key} has no first participant")));
                };
                for p in [Some(first), m.participant2.as_ref()].into_iter().flatten() {
                    if !first_round_entrants.insert(p.id) {
                        return Err(invalid(format!("participant {} seeded twice", p.id)));
                    }
                }
                if m.participant2.is_none() && m.winner.as_ref() != Some(first) {
                    return Err(invalid(format!("{key} bye was not walked over")));
                }
            }
            Some((first_feeder, second_feeder)) => {
                let expected_first = by_key.get(&first_feeder).and_then(|f| f.winner.as_ref());
                if m.participant1.as_ref() != expected_first {
                    return Err(invalid(format!("{key} first slot disagrees with {first_feeder}")));
                }

                match by_key.get(&second_feeder) {
                    Some(feeder) => {
                        if m.participant2.as_ref() != feeder.winner.as_ref() {
                            return Err(invalid(format!(
                                "{key} second slot disagrees with {second_feeder}"
                            )));
                        }
                        if m.winner.is_some() && m.participant2.is_none() {
                            return Err(invalid(format!("{key} decided before it was ready")));
                        }
                    }
                    None => {
                        if m.participant2.is_some() {
                            return Err(invalid(format!("{key} bye has a second participant")));
                        }
                        if m.participant1.is_some() && m.winner != m.participant1 {
                            return Err(invalid(format!("{key} bye was not walked over")));
                        }
                    }
                }
            }
        }
    }

    if first_round_entrants.len() != count {
        return Err(invalid("not every participant has a first-round match"));
    }

    Ok(())
}

fn validate_roster(participants: &[Participant]) -> BracketResult<HashMap<ParticipantId, &Participant>> {
    let mut roster = HashMap::with_capacity(participants.len());
    for (index, participant) in participants.iter().enumerate() {
        if participant.seed as usize != index + 1 {
            return Err(invalid(format!(
                "participant {} has seed {}, expected {}",
                participant.id,
                participant.seed,
                index + 1
            )));
        }
        if participant.name.is_empty() {
            return Err(invalid(format!("participant {} has an empty name", participant.id)));
        }
        if roster.insert(participant.id, participant).is_some() {
            return Err(invalid(format!("duplicate participant id {}", participant.id)));
        }
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{BracketConfig, BracketEngine, IdentityShuffler};

    fn started(names: &[&str]) -> BracketEngine {
        let mut engine =
            BracketEngine::with_shuffler(BracketConfig::default(), IdentityShuffler).unwrap();
        for name in names {
            engine.add_participant(name).unwrap();
        }
        engine.initialize_bracket().unwrap();
        engine
    }

    #[test]
    fn test_engine_snapshots_are_valid() {
        for n in 2..=17 {
            let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let engine = started(&refs);
            assert!(validate_snapshot(&engine.snapshot()).is_ok(), "n = {n}");
        }
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        assert!(validate_snapshot(&BracketSnapshot::default()).is_ok());
    }

    #[test]
    fn test_rejects_seed_gap() {
        let mut snapshot = started(&["a", "b"]).snapshot();
        snapshot.participants[1].seed = 3;
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(BracketError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_rejects_matches_before_start() {
        let mut snapshot = started(&["a", "b"]).snapshot();
        snapshot.is_started = false;
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_foreign_winner() {
        let mut snapshot = started(&["a", "b", "c", "d"]).snapshot();
        let outsider = snapshot.matches[1].participant1.clone();
        snapshot.matches[0].winner = outsider;
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_missing_match() {
        let mut snapshot = started(&["a", "b", "c", "d"]).snapshot();
        snapshot.matches.pop();
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_rejects_unbacked_slot() {
        let mut snapshot = started(&["a", "b", "c", "d"]).snapshot();
        // Final slot filled although R1P0 is undecided
        snapshot.matches[2].participant1 = snapshot.matches[0].participant1.clone();
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_snapshot_champion() {
        let mut engine = started(&["a", "b"]);
        assert!(engine.snapshot().champion().is_none());

        let m = engine.match_at(1, 0).unwrap().clone();
        engine
            .update_match(m.id, m.participant1.as_ref().unwrap().id)
            .unwrap();
        assert_eq!(engine.snapshot().champion().unwrap().name, "a");
    }
}
