//! Randomness source.
//!
//! Every random decision the generator makes goes through [`RandomSource`],
//! so a seeded or scripted source can be swapped in for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random selection and bounded draws.
pub trait RandomSource {
    /// Uniform index in `[0, len)`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in `[min, max]` inclusive.
    fn int_between(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[min, max]` inclusive.
    fn float_between(&mut self, min: f64, max: f64) -> f64;

    /// Fill `bytes` with random data.
    fn fill_bytes(&mut self, bytes: &mut [u8]);
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn int_between(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn float_between(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.rng.fill(bytes);
    }
}
