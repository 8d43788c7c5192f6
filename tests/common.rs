//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use gridworld::{
    GridWorld,
    app::{ExperimentConfig, GridConfig},
    types::Cell,
};

/// Absolute tolerance for comparisons against closed-form Q-values.
pub const TOLERANCE: f64 = 1e-6;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Default 3x4 experiment with a fixed seed.
pub fn classic_config(episodes: usize, seed: u64) -> ExperimentConfig {
    ExperimentConfig::default()
        .with_episodes(episodes)
        .with_seed(seed)
}

/// 3x3 world whose start cell is walled in on all four sides.
///
/// ```text
///   G  #  .
///   #  S  #
///   .  #  .
/// ```
pub fn enclosed_world() -> GridWorld {
    GridWorld::builder()
        .dimensions(3, 3)
        .obstacles([
            Cell::new(0, 1),
            Cell::new(1, 0),
            Cell::new(1, 2),
            Cell::new(2, 1),
        ])
        .goal(Cell::new(0, 0), 1.0)
        .start(Cell::new(1, 1))
        .build()
        .expect("enclosed world is valid")
}

pub fn enclosed_config(episodes: usize, max_steps: usize) -> ExperimentConfig {
    let mut config = ExperimentConfig::default()
        .with_grid(GridConfig::from(&enclosed_world()))
        .with_episodes(episodes)
        .with_seed(3);
    config.training.max_steps_per_episode = max_steps;
    config
}
