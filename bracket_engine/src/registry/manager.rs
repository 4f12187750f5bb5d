//! Registry of independent tournaments, each owning its own bracket engine.

use super::gate::{CreationGate, GateDenied, Unlimited};
use crate::bracket::{BracketConfig, BracketEngine, BracketError, BracketStatus};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Tournament identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(Uuid);

impl TournamentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TournamentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Denied(#[from] GateDenied),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Bracket error: {0}")]
    Bracket(#[from] BracketError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A named tournament and its bracket
#[derive(Debug)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub bracket: BracketEngine,
}

impl Tournament {
    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            status: self.bracket.status(),
            participant_count: self.bracket.participants().len(),
            champion: self.bracket.champion().map(|p| p.name.clone()),
        }
    }
}

/// Serializable overview of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: BracketStatus,
    pub participant_count: usize,
    pub champion: Option<String>,
}

/// Host-side collection of tournaments.
///
/// Every tournament gets its own [`BracketEngine`] built from the
/// registry's configuration. The gate is consulted before each creation.
#[derive(Debug)]
pub struct TournamentRegistry<G = Unlimited> {
    gate: G,
    config: BracketConfig,
    tournaments: Vec<Tournament>,
}

impl TournamentRegistry<Unlimited> {
    /// Registry without a creation limit
    pub fn new() -> Self {
        Self::with_gate(Unlimited, BracketConfig::default())
    }
}

impl Default for TournamentRegistry<Unlimited> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: CreationGate> TournamentRegistry<G> {
    pub fn with_gate(gate: G, config: BracketConfig) -> Self {
        Self {
            gate,
            config,
            tournaments: Vec::new(),
        }
    }

    /// Create a tournament with an empty roster.
    ///
    /// Without a name the tournament is called "Tournament N", N being one
    /// more than the number currently held.
    ///
    /// # Errors
    ///
    /// - `Denied` when the gate refuses
    /// - `Bracket` when the registry's configuration is invalid
    pub fn create_tournament(&mut self, name: Option<&str>) -> RegistryResult<TournamentId> {
        if let Err(denied) = self.gate.check(self.tournaments.len()) {
            warn!("Tournament creation refused: {}", denied.reason);
            return Err(denied.into());
        }

        let bracket = BracketEngine::with_config(self.config.clone())?;
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Tournament {}", self.tournaments.len() + 1),
        };

        let tournament = Tournament {
            id: TournamentId::new(),
            name,
            created_at: Utc::now(),
            bracket,
        };
        let id = tournament.id;
        info!("Created tournament {} '{}'", id, tournament.name);

        // Newest first
        self.tournaments.insert(0, tournament);
        Ok(id)
    }

    pub fn remove_tournament(&mut self, id: TournamentId) -> RegistryResult<Tournament> {
        let index = self
            .tournaments
            .iter()
            .position(|t| t.id == id)
            .ok_or(RegistryError::TournamentNotFound(id))?;
        let removed = self.tournaments.remove(index);
        info!("Removed tournament {} '{}'", id, removed.name);
        Ok(removed)
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    /// Bracket of a tournament, or `TournamentNotFound`
    pub fn bracket_mut(&mut self, id: TournamentId) -> RegistryResult<&mut BracketEngine> {
        self.get_mut(id)
            .map(|t| &mut t.bracket)
            .ok_or(RegistryError::TournamentNotFound(id))
    }

    /// Tournaments, newest first
    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn summaries(&self) -> Vec<TournamentSummary> {
        self.tournaments.iter().map(Tournament::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TournamentLimit;

    #[test]
    fn test_default_names() {
        let mut registry = TournamentRegistry::new();
        let first = registry.create_tournament(None).unwrap();
        let second = registry.create_tournament(Some("   ")).unwrap();
        let third = registry.create_tournament(Some("Spring Open")).unwrap();

        assert_eq!(registry.get(first).unwrap().name, "Tournament 1");
        assert_eq!(registry.get(second).unwrap().name, "Tournament 2");
        assert_eq!(registry.get(third).unwrap().name, "Spring Open");
    }

    #[test]
    fn test_newest_first() {
        let mut registry = TournamentRegistry::new();
        let a = registry.create_tournament(Some("a")).unwrap();
        let b = registry.create_tournament(Some("b")).unwrap();

        let ids: Vec<_> = registry.tournaments().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_gate_denies() {
        let mut registry = TournamentRegistry::with_gate(TournamentLimit(1), BracketConfig::default());
        registry.create_tournament(None).unwrap();

        let err = registry.create_tournament(None).unwrap_err();
        assert!(matches!(err, RegistryError::Denied(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_frees_gate_slot() {
        let mut registry = TournamentRegistry::with_gate(TournamentLimit(1), BracketConfig::default());
        let id = registry.create_tournament(None).unwrap();
        registry.remove_tournament(id).unwrap();
        assert!(registry.is_empty());

        assert!(registry.create_tournament(None).is_ok());
        assert!(matches!(
            registry.remove_tournament(id),
            Err(RegistryError::TournamentNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_surfaces_as_bracket_error() {
        let config = BracketConfig {
            min_participants: 0,
            ..Default::default()
        };
        let mut registry = TournamentRegistry::with_gate(Unlimited, config);
        let err = registry.create_tournament(None).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Bracket(BracketError::Configuration(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut registry = TournamentRegistry::new();
        let id = registry.create_tournament(Some("Cup")).unwrap();
        let bracket = registry.bracket_mut(id).unwrap();
        bracket.add_participant("a").unwrap();
        bracket.add_participant("b").unwrap();

        let summary = registry.get(id).unwrap().summary();
        assert_eq!(summary.name, "Cup");
        assert_eq!(summary.status, BracketStatus::Registering);
        assert_eq!(summary.participant_count, 2);
        assert_eq!(summary.champion, None);
    }
}
