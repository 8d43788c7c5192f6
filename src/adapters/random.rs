//! Random sources for epsilon-greedy exploration.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{ports::RandomSource, types::Action};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// `StdRng`-backed source: OS-seeded by default, reproducible when seeded.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Non-deterministic source seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
        }
    }

    /// Deterministic source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: build_rng(Some(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn action_index(&mut self) -> usize {
        self.rng.random_range(0..Action::COUNT)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
    }
}

/// Replays fixed sequences of draws, cycling when exhausted.
///
/// Empty sequences yield `0.0` and action index `0`. Action indices are
/// reduced modulo the number of actions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    uniforms: Vec<f64>,
    indices: Vec<usize>,
    next_uniform: usize,
    next_index: usize,
}

impl ScriptedRandom {
    pub fn new(uniforms: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            uniforms,
            indices,
            next_uniform: 0,
            next_index: 0,
        }
    }

    /// Number of uniform draws served so far.
    pub fn uniforms_drawn(&self) -> usize {
        self.next_uniform
    }

    /// Number of action-index draws served so far.
    pub fn indices_drawn(&self) -> usize {
        self.next_index
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        let value = if self.uniforms.is_empty() {
            0.0
        } else {
            self.uniforms[self.next_uniform % self.uniforms.len()]
        };
        self.next_uniform += 1;
        value
    }

    fn action_index(&mut self) -> usize {
        let value = if self.indices.is_empty() {
            0
        } else {
            self.indices[self.next_index % self.indices.len()] % Action::COUNT
        };
        self.next_index += 1;
        value
    }

    fn reseed(&mut self, _seed: u64) {
        self.next_uniform = 0;
        self.next_index = 0;
    }
}
