//! Export functionality for training data
//!
//! This module provides exporters for writing training diagnostics to
//! formats suitable for external analysis tools.

pub mod rewards_csv;

pub use rewards_csv::{write_rewards, write_rewards_csv};
