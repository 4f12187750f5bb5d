//! Random source used to pair participants when a bracket is generated.
//!
//! Pairing is a uniform random permutation of the roster; seeds play no
//! part in it. The source is swappable so callers can reproduce a bracket
//! (seeded RNG) or assert exact pairings in tests (identity or a closure).

use super::models::Participant;
use rand::{RngCore, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Produces the pairing order for a new bracket.
///
/// Implementations must permute the slice in place without adding or
/// dropping entries.
pub trait Shuffler {
    fn shuffle(&mut self, participants: &mut [Participant]);
}

/// Any `FnMut(&mut [Participant])` can act as a shuffler
impl<F> Shuffler for F
where
    F: FnMut(&mut [Participant]),
{
    fn shuffle(&mut self, participants: &mut [Participant]) {
        self(participants)
    }
}

/// Unbiased Fisher–Yates shuffle backed by an RNG
pub struct RandomShuffler<R = StdRng> {
    rng: R,
}

impl RandomShuffler<StdRng> {
    /// Create a shuffler seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible shuffler
    ///
    /// The same seed and roster always produce the same pairings.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> RandomShuffler<R> {
    /// Wrap an arbitrary RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomShuffler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Shuffler for RandomShuffler<R> {
    fn shuffle(&mut self, participants: &mut [Participant]) {
        participants.shuffle(&mut self.rng);
    }
}

/// Leaves the roster order untouched.
///
/// Pairings become `(seed 1, seed 2)`, `(seed 3, seed 4)`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _participants: &mut [Participant]) {}
}
