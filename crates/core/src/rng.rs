//! Injectable random sources for the stochastic strategies.
//!
//! Strategies never reach for a global generator. They receive a
//! [`RandomSource`] at construction, which lets tests replay exact
//! sequences with [`SequenceSource`] or [`Xorshift64`], while a live
//! viewer uses [`EntropySource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next uniformly distributed value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed value in `[min, max)`.
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed angle in `[0, 2π)`.
    fn next_angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }

    /// Returns `1.0` or `-1.0` with equal probability.
    fn next_sign(&mut self) -> f64 {
        if self.next_f64() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Xorshift64 PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced
/// with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` divided by 2^53.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Non-deterministic source seeded from OS entropy.
#[derive(Debug, Clone)]
pub struct EntropySource(StdRng);

impl EntropySource {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// An empty list always yields `0.0`. Values are returned as given, so a
/// test can script exact reflection outcomes.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
