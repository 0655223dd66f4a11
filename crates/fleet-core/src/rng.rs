//! Seeded randomness for order generation.
//!
//! A run draws every random decision from one `SimRng` built from the
//! configured seed and used on the simulation thread only.  The tick engine
//! itself is deterministic, so the same seed reproduces the same orders,
//! events and scores.

use std::ops::RangeInclusive;

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::Tick;

/// Deterministic RNG for one simulation run.
pub struct SimRng {
    rng:  SmallRng,
    seed: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed), seed }
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A tick drawn uniformly from `range`, both ends included.
    ///
    /// Panics if the range is empty.
    pub fn tick_in(&mut self, range: RangeInclusive<Tick>) -> Tick {
        Tick(self.rng.gen_range(range.start().0..=range.end().0))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.rng.gen_range(range)
    }

    /// A fraction in `(0, 1]`; never zero, so scaled weights stay positive.
    pub fn fraction(&mut self) -> f64 {
        1.0 - self.rng.r#gen::<f64>()
    }

    /// An index drawn with the probabilities encoded in `weights`.
    pub fn weighted(&mut self, weights: &WeightedIndex<f64>) -> usize {
        weights.sample(&mut self.rng)
    }

    /// `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.rng)
    }
}
