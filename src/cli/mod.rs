//! CLI infrastructure for the gridworld toolkit
//!
//! This module provides the command-line interface for training an agent,
//! printing its learned policy and writing the default configuration.

pub mod commands;
pub mod logging;
pub mod output;
