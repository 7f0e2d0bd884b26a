//! # Random Sources
//!
//! The randomness seam for generation, archetype selection and monster AI.
//!
//! Game code never reaches for a global generator. It takes a
//! `&mut R where R: RandomSource`, which is implemented for every
//! [`rand::RngCore`] and for [`ScriptedRandom`], a replay source used to force
//! specific outcomes in tests.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniformly distributed floats in `[0, 1)`.
///
/// Only [`RandomSource::next_float`] is required; the derived helpers map that
/// single draw onto the integer ranges used by the generators.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Returns an index uniformly distributed in `[0, upper)`.
    ///
    /// Returns 0 when `upper` is 0.
    fn gen_index(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        let value = (self.next_float() * upper as f64).floor() as u32;
        value.min(upper - 1)
    }

    /// Returns an integer uniformly distributed in `[low, high]`.
    fn gen_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        low + self.gen_index((high - low + 1) as u32) as i32
    }

    /// Returns true with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_float() < p
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_float(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Creates a seeded random number generator.
///
/// # Examples
///
/// ```
/// use descent::{create_rng, RandomSource};
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.next_float(), b.next_float());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Useful for pinning down a single branch of a random decision, e.g. which
/// axis a monster steps along.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source that yields `values` in order, forever.
    ///
    /// An empty list behaves as a constant 0.0. Values are clamped into
    /// `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Creates a source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_float(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
