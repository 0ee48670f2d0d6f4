//! Seed generation for the hand-drawn generator.
//!
//! Shapes store their seed; fresh seeds are only drawn at creation and on an
//! explicit reshuffle, through whatever [`SeedSource`] the host injects.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest seed handed out, matching the generator's 31-bit state.
const MAX_SEED: u32 = 1 << 31;

pub trait SeedSource {
    fn next_seed(&mut self) -> u32;
}

impl<F> SeedSource for F
where
    F: FnMut() -> u32,
{
    fn next_seed(&mut self) -> u32 {
        self()
    }
}

/// Seeds from the platform entropy source.
#[derive(Debug)]
pub struct RandomSeeds {
    rng: StdRng,
}

impl RandomSeeds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, for tests and batch rendering.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSeeds {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSource for RandomSeeds {
    fn next_seed(&mut self) -> u32 {
        self.rng.gen_range(1..MAX_SEED)
    }
}
