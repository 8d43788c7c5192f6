//! Subcommands of the `gridworld` binary

pub mod config;
pub mod train;
