//! Training pipeline abstractions
//!
//! This module provides:
//! - The episodic Q-learning loop over a fixed grid world
//! - Per-episode records and the aggregated training result
//! - Observers for progress, metrics, milestones and JSONL export

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, MilestoneObserver, Observation,
    ProgressObserver,
};
pub use training::{
    EpisodeOutcome, EpisodeRecord, StepEvent, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::Observer;
