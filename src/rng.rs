use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness used for food placement and kind selection.
///
/// Implementations must be deterministic for a given construction so that a
/// game can be replayed exactly.
pub trait RandomSource {
    /// Returns a uniform integer in `[0, n)`. Returns 0 when `n == 0`.
    fn next_int(&mut self, n: usize) -> usize;

    /// Returns a uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_int(&mut self, n: usize) -> usize {
        (**self).next_int(n)
    }

    fn next_float(&mut self) -> f64 {
        (**self).next_float()
    }
}

/// Production random source backed by a seedable platform PRNG.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a reproducible source from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn next_float(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Deterministic source replaying a fixed sequence of values.
///
/// Each draw takes the next value (wrapping around at the end) reduced modulo
/// the requested range, which keeps scripted tests independent of board size.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source replaying `values`. An empty script always yields 0.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Creates a source that always yields 0 (first free cell, first kind).
    #[must_use]
    pub fn zeros() -> Self {
        Self::new(Vec::new())
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_raw(&mut self) -> usize {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, n: usize) -> usize {
        let raw = self.next_raw();
        if n == 0 { 0 } else { raw % n }
    }

    fn next_float(&mut self) -> f64 {
        const RESOLUTION: usize = 1 << 16;
        self.next_int(RESOLUTION) as f64 / RESOLUTION as f64
    }
}
