//! Deterministic per-object and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each object gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (object_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive object IDs uniformly across the seed space.
//! This means:
//!
//! - Objects never share RNG state, so trajectories do not perturb each other.
//! - Adding or removing objects at the end of the list does not disturb the
//!   seeds of existing objects — runs are reproducible as populations grow.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ObjectId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ObjectRng ─────────────────────────────────────────────────────────────────

/// Per-object deterministic RNG.
///
/// Create one per object at simulation init; store in a parallel
/// `Vec<ObjectRng>` alongside the object list.
pub struct ObjectRng(SmallRng);

impl ObjectRng {
    /// Seed deterministically from the run's global seed and an object ID.
    pub fn new(global_seed: u64, object: ObjectId) -> Self {
        let seed = global_seed ^ (object.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ObjectRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`, etc.)
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A uniform draw from `[0, 1)` — the inverse-CDF walk input.
    #[inline]
    pub fn gen_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations: graph generation, overlay
/// sampling, transition-matrix synthesis, speed draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// seeding independent generators deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
