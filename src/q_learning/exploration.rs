//! Exploration rate schedule

use serde::{Deserialize, Serialize};

/// Multiplicatively decaying exploration rate with a floor.
///
/// Epsilon only ever moves down: each call to [`decay`](Self::decay) sets
/// `epsilon = max(floor, epsilon * decay_rate)`. There is no reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSchedule {
    epsilon: f64,
    initial: f64,
    decay_rate: f64,
    floor: f64,
}

impl ExplorationSchedule {
    pub fn new(initial: f64, decay_rate: f64, floor: f64) -> Self {
        Self {
            epsilon: initial,
            initial,
            decay_rate,
            floor,
        }
    }

    /// Current exploration rate
    pub fn current(&self) -> f64 {
        self.epsilon
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Apply one episode's worth of decay and return the new rate
    pub fn decay(&mut self) -> f64 {
        self.epsilon = (self.epsilon * self.decay_rate).max(self.floor);
        self.epsilon
    }
}
