//! Analysis of training runs
//!
//! Diagnostics computed from the reward history of a finished run.

pub mod stats;

pub use stats::{RewardStats, moving_average};
