//! Host-side registry for running several tournaments side by side.
//!
//! The bracket engine has no notion of ownership or limits. This module
//! holds one engine per tournament and asks a [`CreationGate`] before each
//! new one is built, which is the single point where host policy (free
//! versus paid tiers, subscription windows, quotas) plugs in.
//!
//! ## Example
//!
//! ```
//! use bracket_engine::bracket::BracketConfig;
//! use bracket_engine::registry::{RegistryError, TournamentLimit, TournamentRegistry};
//!
//! let mut registry = TournamentRegistry::with_gate(TournamentLimit(1), BracketConfig::default());
//! let id = registry.create_tournament(Some("Friday Night"))?;
//! registry.bracket_mut(id)?.add_participant("Ada")?;
//!
//! assert!(matches!(
//!     registry.create_tournament(None),
//!     Err(RegistryError::Denied(_))
//! ));
//! # Ok::<(), RegistryError>(())
//! ```

pub mod gate;
pub mod manager;

pub use gate::{CreationGate, GateDenied, TournamentLimit, Unlimited};
pub use manager::{
    RegistryError, RegistryResult, Tournament, TournamentId, TournamentRegistry,
    TournamentSummary,
};
