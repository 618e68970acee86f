//! Randomness used by the synthetic data generators

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generator shared by the services that synthesize data.
///
/// The generators themselves take any `rand::Rng`; this type only owns the
/// state behind the shared services. Seeded from the OS in production, from a
/// fixed seed in tests.
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    #[must_use]
    pub fn from_os() -> Self {
        Self::from_rng(rand::make_rng())
    }

    /// Reproducible sequence for tests and demos
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Run `draw` with exclusive access to the generator
    pub fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut *rng)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_os()
    }
}
