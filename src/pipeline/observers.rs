//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::{EpisodeOutcome, EpisodeRecord, StepEvent};
use crate::{Error, Result, ports::Observer};

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    #[serde(flatten)]
    pub record: EpisodeRecord,
    /// Steps in the episode (serialized as `transitions`)
    #[serde(rename = "transitions")]
    pub steps: Vec<StepEvent>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    traps: usize,
    capped: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            traps: 0,
            capped: 0,
        }
    }

    fn message(&self) -> String {
        format!("G:{} X:{} C:{}", self.goals, self.traps, self.capped)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        match record.outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Trap => self.traps += 1,
            EpisodeOutcome::StepCapExceeded => self.capped += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.episode as u64 + 1);
            if record.episode % 100 == 0 {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    goals: usize,
    traps: usize,
    capped: usize,
    total_episodes: usize,
    explorations: usize,
    bumps: usize,
    step_counts: Vec<usize>,
    rewards: Vec<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of episodes ending in a goal cell
    pub fn goal_rate(&self) -> f64 {
        self.rate(self.goals)
    }

    /// Fraction of episodes ending in a trap cell
    pub fn trap_rate(&self) -> f64 {
        self.rate(self.traps)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            count as f64 / self.total_episodes as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Get average total reward per episode
    pub fn avg_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let total_steps: usize = self.step_counts.iter().sum();
        MetricsSummary {
            total_episodes: self.total_episodes,
            goals: self.goals,
            traps: self.traps,
            step_cap_hits: self.capped,
            goal_rate: self.goal_rate(),
            trap_rate: self.trap_rate(),
            avg_episode_length: self.avg_episode_length(),
            avg_reward: self.avg_reward(),
            exploration_fraction: if total_steps == 0 {
                0.0
            } else {
                self.explorations as f64 / total_steps as f64
            },
            wall_bumps: self.bumps,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub goals: usize,
    pub traps: usize,
    pub step_cap_hits: usize,
    pub goal_rate: f64,
    pub trap_rate: f64,
    pub avg_episode_length: f64,
    pub avg_reward: f64,
    /// Share of steps whose action was chosen at random
    pub exploration_fraction: f64,
    /// Steps that left the agent in place
    pub wall_bumps: usize,
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.step_counts.push(0);
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step: &StepEvent) -> Result<()> {
        if let Some(last) = self.step_counts.last_mut() {
            *last += 1;
        }
        if step.selection.is_exploration() {
            self.explorations += 1;
        }
        if step.next_cell == step.cell {
            self.bumps += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        self.total_episodes += 1;
        self.rewards.push(record.total_reward);
        match record.outcome {
            EpisodeOutcome::Goal => self.goals += 1,
            EpisodeOutcome::Trap => self.traps += 1,
            EpisodeOutcome::StepCapExceeded => self.capped += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepEvent>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create observations file {}", path.display()), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step: &StepEvent) -> Result<()> {
        self.current_steps.push(*step);
        Ok(())
    }

    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        let observation = Observation {
            record: *record,
            steps: std::mem::take(&mut self.current_steps),
        };

        // Write as JSONL (one JSON object per line)
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Milestone observer - Tracks key learning events
///
/// Records the first episode that reached a goal, and the last episodes that
/// fell into a trap or hit the step cap. A late last trap means the
/// exploration floor still leads the agent into traps.
#[derive(Debug, Default)]
pub struct MilestoneObserver {
    first_goal: Option<usize>,
    last_trap: Option<usize>,
    last_step_cap: Option<usize>,
    episodes: usize,
}

impl MilestoneObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// First episode that ended in a goal cell
    pub fn first_goal(&self) -> Option<usize> {
        self.first_goal
    }

    /// Last episode that ended in a trap cell
    pub fn last_trap(&self) -> Option<usize> {
        self.last_trap
    }

    /// Last episode cut off by the step cap
    pub fn last_step_cap(&self) -> Option<usize> {
        self.last_step_cap
    }

    /// Display milestone summary
    pub fn display_summary(&self) {
        println!("\n=== Learning Milestones ===");
        match self.first_goal {
            Some(episode) => println!("  First goal: Episode #{}", episode + 1),
            None => println!("  First goal: Not reached"),
        }
        match self.last_trap {
            Some(episode) => {
                println!("  Last trap: Episode #{}", episode + 1);
                println!("  Episodes since last trap: {}", self.episodes - episode - 1);
            }
            None => println!("  Last trap: Never"),
        }
        if let Some(episode) = self.last_step_cap {
            println!("  Last step-cap cutoff: Episode #{}", episode + 1);
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_episode_end(&mut self, record: &EpisodeRecord) -> Result<()> {
        self.episodes = record.episode + 1;
        match record.outcome {
            EpisodeOutcome::Goal => {
                self.first_goal.get_or_insert(record.episode);
            }
            EpisodeOutcome::Trap => self.last_trap = Some(record.episode),
            EpisodeOutcome::StepCapExceeded => self.last_step_cap = Some(record.episode),
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.display_summary();
        Ok(())
    }
}
