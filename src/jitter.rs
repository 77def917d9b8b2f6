//! Random delays and counts.
//!
//! A [`Jitter`] owns its generator, so every caller that needs randomness holds its own
//! instead of sharing one global source.

use rand::{
    distributions::uniform::SampleUniform,
    rngs::StdRng,
    Rng, SeedableRng,
};

/// A uniform random source for values in a half-open range.
#[derive(Debug, Clone)]
pub struct Jitter<R = StdRng> {
    rng: R,
}

impl Jitter<StdRng> {
    /// Seeds a new generator from operating system entropy.
    #[inline]
    pub fn from_entropy() -> Self {
        Jitter {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for Jitter<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> Jitter<R> {
    /// Wraps an existing generator.
    #[inline]
    pub fn new(rng: R) -> Self {
        Jitter { rng }
    }

    /// Returns a value in `[min, max)`, or `min` when the range is empty.
    pub fn between<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Returns the underlying generator.
    #[inline]
    pub fn into_inner(self) -> R {
        self.rng
    }
}
