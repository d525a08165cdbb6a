//! Deterministic per-entity and per-run RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each entity (a station, a passenger source) gets its own `SmallRng`
//! seeded by:
//!
//!   seed = global_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream numbers uniformly across the seed space.
//! This means:
//!
//! - Entities never share RNG state, so a draw by one station cannot shift
//!   the sequence seen by another.
//! - Adding entities at the end of a table does not disturb the seeds of
//!   existing ones.
//! - There is no process-global generator anywhere in the workspace.

use rand::rngs::SmallRng;
use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── EntityRng ─────────────────────────────────────────────────────────────────

/// Per-entity deterministic RNG.
///
/// Owned by the world state next to the entity it serves and handed to that
/// entity's processes by `&mut`.
pub struct EntityRng(SmallRng);

impl EntityRng {
    /// Seed deterministically from the run's global seed and a stream number
    /// (normally the entity's index).
    pub fn new(global_seed: u64, stream: u64) -> Self {
        let seed = global_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        EntityRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw one value from `dist`.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: D) -> T {
        self.0.sample(dist)
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: Distribution<T>,
    {
        self.0.r#gen()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG used to derive replication seeds.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a fresh 64-bit seed for replication `offset`.
    pub fn child_seed(&mut self, offset: u64) -> u64 {
        self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT)
    }
}
