//! Host policy consulted before a new tournament is created.

use thiserror::Error;

/// Refusal from a [`CreationGate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tournament creation denied: {reason}")]
pub struct GateDenied {
    pub reason: String,
}

impl GateDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Decides whether another tournament may be created.
///
/// The registry asks the gate before constructing each engine. Tiers,
/// payments, and how long access stays valid live in the host's
/// implementation, not in the engine.
pub trait CreationGate {
    /// `owned` is the number of tournaments the registry currently holds
    fn check(&self, owned: usize) -> Result<(), GateDenied>;
}

impl<G: CreationGate + ?Sized> CreationGate for &G {
    fn check(&self, owned: usize) -> Result<(), GateDenied> {
        (**self).check(owned)
    }
}

impl<G: CreationGate + ?Sized> CreationGate for Box<G> {
    fn check(&self, owned: usize) -> Result<(), GateDenied> {
        (**self).check(owned)
    }
}

/// Always allows creation
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl CreationGate for Unlimited {
    fn check(&self, _owned: usize) -> Result<(), GateDenied> {
        Ok(())
    }
}

/// Allows at most `n` tournaments at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentLimit(pub usize);

impl CreationGate for TournamentLimit {
    fn check(&self, owned: usize) -> Result<(), GateDenied> {
        if owned >= self.0 {
            return Err(GateDenied::new(format!(
                "limit of {} tournament{} reached",
                self.0,
                if self.0 == 1 { "" } else { "s" }
            )));
        }
        Ok(())
    }
}
