//! Random source used by spawning
//!
//! The loop only needs two draws, so it takes a small trait instead of a
//! concrete generator. Tests can plug in a scripted source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Randomness needed by the simulation
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform integer in [0, n); returns 0 when `n == 0`
    fn below(&mut self, n: u32) -> u32;

    /// Uniform float in [min, min + span)
    fn range_f32(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_f32() * span
    }

    /// `true` with probability `percent` / 100
    fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays fixed values, cycling when exhausted
///
/// `floats` feed `next_f32`, `ints` feed `below` (reduced modulo `n`).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    floats: Vec<f32>,
    ints: Vec<u32>,
    float_idx: usize,
    int_idx: usize,
}

impl ScriptedRng {
    pub fn new(floats: Vec<f32>, ints: Vec<u32>) -> Self {
        Self {
            floats,
            ints,
            float_idx: 0,
            int_idx: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        if self.floats.is_empty() {
            return 0.0;
        }
        let v = self.floats[self.float_idx % self.floats.len()];
        self.float_idx += 1;
        v
    }

    fn below(&mut self, n: u32) -> u32 {
        if self.ints.is_empty() || n == 0 {
            return 0;
        }
        let v = self.ints[self.int_idx % self.ints.len()];
        self.int_idx += 1;
        v % n
    }
}
