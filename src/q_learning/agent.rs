//! Q-learning agent
//!
//! Owns the Q-table, the exploration schedule and the random source. The
//! training pipeline drives it one step at a time; nothing else writes to
//! its Q-table.

use std::fmt;

use crate::{
    adapters::StdRandom,
    app::LearningConfig,
    grid::GridWorld,
    ports::RandomSource,
    q_learning::{
        exploration::ExplorationSchedule,
        policy::{EpsilonGreedy, Selection},
        q_table::QTable,
    },
    types::{Action, Cell},
};

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action taken next.
pub struct QLearningAgent {
    q_table: QTable,
    exploration: ExplorationSchedule,
    policy: EpsilonGreedy,
    rng: Box<dyn RandomSource>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent for a `rows` x `cols` grid
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `epsilon` - Initial exploration rate
    /// * `epsilon_decay` - Multiplicative decay per episode
    /// * `min_epsilon` - Minimum exploration rate
    pub fn new(
        rows: usize,
        cols: usize,
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        epsilon_decay: f64,
        min_epsilon: f64,
    ) -> Self {
        Self {
            q_table: QTable::new(rows, cols, learning_rate, discount_factor),
            exploration: ExplorationSchedule::new(epsilon, epsilon_decay, min_epsilon),
            policy: EpsilonGreedy,
            rng: Box::new(StdRandom::new()),
        }
    }

    /// Create an agent sized for `world` with the given learning parameters
    pub fn for_world(world: &GridWorld, config: &LearningConfig) -> Self {
        Self::new(
            world.rows(),
            world.cols(),
            config.learning_rate,
            config.discount_factor,
            config.initial_epsilon,
            config.epsilon_decay,
            config.min_epsilon,
        )
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Box::new(StdRandom::seeded(seed));
        self
    }

    /// Replace the random source (scripted sources in tests)
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Reseed the current random source
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// ε-greedy action selection at the current exploration rate
    pub fn select_action(&mut self, cell: Cell) -> Selection {
        let epsilon = self.exploration.current();
        self.policy
            .select(&self.q_table, cell, epsilon, self.rng.as_mut())
    }

    /// Apply one Q-learning backup and return the new Q-value
    pub fn learn(&mut self, cell: Cell, action: Action, reward: f64, next_cell: Cell) -> f64 {
        self.q_table.q_learning_update(cell, action, reward, next_cell)
    }

    /// Decay epsilon after an episode and return the new rate
    pub fn end_episode(&mut self) -> f64 {
        self.exploration.decay()
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.current()
    }

    pub fn exploration(&self) -> &ExplorationSchedule {
        &self.exploration
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Consume the agent, keeping only what it learned
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }
}

impl fmt::Debug for QLearningAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("q_table", &self.q_table)
            .field("exploration", &self.exploration)
            .finish_non_exhaustive()
    }
}
