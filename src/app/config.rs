//! Configuration types for experiments.
//!
//! Everything a run needs is fixed up front in an [`ExperimentConfig`]:
//! the grid layout, the learning parameters and the training budget. The
//! defaults reproduce the canonical 3x4 world.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{GridWorld, GridWorldBuilder},
    pipeline::TrainingConfig,
    types::Cell,
};

/// A terminal cell and the reward for entering it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    pub cell: Cell,
    pub reward: f64,
}

/// Grid layout as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    #[serde(default)]
    pub terminals: Vec<TerminalConfig>,
    pub start: Cell,
}

impl GridConfig {
    /// Validate the layout and build the world.
    pub fn build(&self) -> Result<GridWorld> {
        self.terminals
            .iter()
            .fold(
                GridWorldBuilder::new()
                    .dimensions(self.rows, self.cols)
                    .obstacles(self.obstacles.iter().copied())
                    .start(self.start),
                |builder, terminal| builder.terminal(terminal.cell, terminal.reward),
            )
            .build()
    }
}

impl From<&GridWorld> for GridConfig {
    fn from(world: &GridWorld) -> Self {
        Self {
            rows: world.rows(),
            cols: world.cols(),
            obstacles: world.obstacles().collect(),
            terminals: world
                .terminals()
                .map(|(cell, reward)| TerminalConfig { cell, reward })
                .collect(),
            start: world.start(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from(&GridWorld::classic())
    }
}

/// Q-learning hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate before the first episode
    pub initial_epsilon: f64,
    /// Multiplicative epsilon decay applied after every episode
    pub epsilon_decay: f64,
    /// Exploration floor
    pub min_epsilon: f64,
}

impl LearningConfig {
    /// Set the learning rate α.
    pub fn with_learning_rate(mut self, value: f64) -> Self {
        self.learning_rate = value;
        self
    }

    /// Set the discount factor γ.
    pub fn with_discount_factor(mut self, value: f64) -> Self {
        self.discount_factor = value;
        self
    }

    /// Set the exploration rate used for the first episode.
    pub fn with_initial_epsilon(mut self, value: f64) -> Self {
        self.initial_epsilon = value;
        self
    }

    pub fn with_epsilon_decay(mut self, value: f64) -> Self {
        self.epsilon_decay = value;
        self
    }

    pub fn with_min_epsilon(mut self, value: f64) -> Self {
        self.min_epsilon = value;
        self
    }

    /// Fixed exploration rate: no decay, floor equal to the rate.
    pub fn with_constant_epsilon(self, value: f64) -> Self {
        self.with_initial_epsilon(value)
            .with_epsilon_decay(1.0)
            .with_min_epsilon(value)
    }

    /// Check every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "learning_rate",
            self.learning_rate,
            |v| v > 0.0 && v <= 1.0,
            "0 < value <= 1",
        )?;
        check_range(
            "discount_factor",
            self.discount_factor,
            |v| (0.0..=1.0).contains(&v),
            "0 <= value <= 1",
        )?;
        check_range(
            "initial_epsilon",
            self.initial_epsilon,
            |v| (0.0..=1.0).contains(&v),
            "0 <= value <= 1",
        )?;
        check_range(
            "epsilon_decay",
            self.epsilon_decay,
            |v| v > 0.0 && v <= 1.0,
            "0 < value <= 1",
        )?;
        check_range(
            "min_epsilon",
            self.min_epsilon,
            |v| (0.0..=1.0).contains(&v),
            "0 <= value <= 1",
        )?;
        // A floor above the starting rate would make epsilon grow
        check_range(
            "min_epsilon",
            self.min_epsilon,
            |v| v <= self.initial_epsilon,
            "value <= initial_epsilon",
        )
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.9,
            discount_factor: 0.5,
            initial_epsilon: 1.0,
            epsilon_decay: 0.99,
            min_epsilon: 0.01,
        }
    }
}

pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    accept: impl Fn(f64) -> bool,
    expected: &'static str,
) -> Result<()> {
    if value.is_finite() && accept(value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            expected,
        })
    }
}

/// Complete description of a run.
///
/// # Examples
///
/// ```
/// use gridworld::app::ExperimentConfig;
///
/// let config = ExperimentConfig::default().with_seed(42).with_episodes(500);
/// let world = config.validate().unwrap();
/// assert_eq!(world.rows(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub learning: LearningConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

impl ExperimentConfig {
    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.training.seed = Some(seed);
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.training.episodes = episodes;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_learning(mut self, learning: LearningConfig) -> Self {
        self.learning = learning;
        self
    }

    /// Validate all sections and build the world.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found: grid layout first, then
    /// learning parameters, then the training budget.
    pub fn validate(&self) -> Result<GridWorld> {
        let world = self.grid.build()?;
        self.learning.validate()?;
        self.training.validate()?;
        Ok(world)
    }

    /// Load a configuration from a JSON file. Missing sections take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open config {}", path.display()), e))?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create config {}", path.display()), e))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
