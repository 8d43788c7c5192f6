//! Tabular Q-learning in a small deterministic grid world
//!
//! This crate provides:
//! - A validated grid world model with obstacles and rewarding terminal cells
//! - A Q-learning agent with epsilon-greedy exploration and per-episode decay
//! - An observable episodic training pipeline
//! - Policy reporting, greedy rollouts and reward statistics
//!
//! ```
//! use gridworld::{app::{App, ExperimentConfig}, types::Cell};
//!
//! let config = ExperimentConfig::default().with_episodes(200).with_seed(7);
//! let run = App::new(config)?.train(Vec::new())?;
//! assert_eq!(run.result.reward_history.len(), 200);
//! assert!(run.report.entry(Cell::new(0, 3)).is_some());
//! # Ok::<(), gridworld::Error>(())
//! ```

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod report;
pub mod types;

pub use error::{Error, Result};
pub use grid::{GridWorld, GridWorldBuilder};
pub use q_learning::{QLearningAgent, QTable};
pub use report::{PolicyReport, Rollout, greedy_rollout};
pub use types::{Action, Cell};
