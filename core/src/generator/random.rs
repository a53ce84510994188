use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::*;

/// Mine source backed by a seeded ChaCha8 stream.
///
/// ChaCha output is fixed by its algorithm rather than by the platform or crate version, so a stored seed
/// reproduces the same layout wherever a game is replayed.
#[derive(Clone, Debug)]
pub struct SeededMineSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededMineSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Picks a fresh seed from the thread-local OS-seeded generator.
    pub fn entropy_seed() -> u64 {
        rand::rng().random()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineSource for SeededMineSource {
    fn choose(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}
