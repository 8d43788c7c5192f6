//! Application layer: experiment configuration and wiring.
//!
//! ```text
//!   ExperimentConfig ──validate──▶ App ──create_agent──▶ QLearningAgent
//!                                   │
//!                                   └──create_pipeline──▶ TrainingPipeline
//! ```

pub mod config;
pub mod container;

pub use config::{ExperimentConfig, GridConfig, LearningConfig, TerminalConfig};
pub use container::{App, TrainedRun};
