use crate::domain::ports::Shuffler;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Shuffler backed by any `rand` generator.
pub struct RngShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngShuffler<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    /// Seeded when a seed is configured, otherwise different on every run.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves every sequence as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrder;

impl Shuffler for InputOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
