//! Random draws for boarding and alighting.
//!
//! Station and train operations never reach for a global RNG. They take a
//! [`RandomSource`] argument, so simulations can be seeded and tests can
//! script exact outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed integers over an inclusive range.
///
/// Callers always pass `min <= max`. Implementations must return a value
/// in `[min, max]`.
pub trait RandomSource {
    /// Draw an integer in `[min, max]`.
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        (**self).int_inclusive(min, max)
    }
}

/// Production random source backed by `ChaCha8Rng`.
///
/// Identical seeds produce identical simulations.
#[derive(Debug, Clone)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    /// Create a source seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RandomSource for SimRng {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "invalid range: {min} > {max}");
        self.0.gen_range(min..=max)
    }
}

/// Always returns the same value, clamped into the requested range.
///
/// `FixedRandom(u32::MAX)` always picks the maximum, `FixedRandom(0)` the
/// minimum.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

/// Replays a queue of values and records every range it was asked for.
///
/// Each value is clamped into the requested range. Once the queue is
/// exhausted, the minimum of the range is returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    next: usize,
    requests: Vec<(u32, u32)>,
}

impl ScriptedRandom {
    /// Create a source that returns `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
            requests: Vec::new(),
        }
    }

    /// Every `(min, max)` range requested so far, oldest first.
    pub fn requests(&self) -> &[(u32, u32)] {
        &self.requests
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.requests.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.requests.push((min, max));
        let value = self.values.get(self.next).copied().unwrap_or(min);
        self.next += 1;
        value.clamp(min, max)
    }
}
