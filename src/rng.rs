//! Seeded random stream shared by the generators
//!
//! One `RandomSeed` is owned per generation call and threaded through every
//! stage. Output depends only on the seed and the order of draws.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Owned deterministic random stream
#[derive(Debug, Clone)]
pub struct RandomSeed {
    seed: u64,
    rng: Pcg32,
}

impl RandomSeed {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, upper)`. `upper` must be non-zero.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// True with probability `chance`.
    pub fn chance(&mut self, chance: f32) -> bool {
        self.rng.random::<f32>() < chance
    }
}
