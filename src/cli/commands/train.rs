//! Train command - Train a Q-learning agent and report the learned policy

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    analysis::{RewardStats, moving_average},
    app::{App, ExperimentConfig},
    cli::output::{format_number, print_kv, print_rate, print_section, print_subsection},
    export::write_rewards_csv,
    pipeline::{JsonlObserver, MilestoneObserver, Observer, ProgressObserver, TrainingResult},
    report::{PolicyReport, Rollout, RolloutEnd},
};

#[derive(Debug, Serialize)]
struct SummaryStats {
    total_episodes: usize,
    goals: usize,
    traps: usize,
    step_cap_hits: usize,
    goal_rate: f64,
    trap_rate: f64,
    average_steps: f64,
    final_epsilon: f64,
}

impl From<&TrainingResult> for SummaryStats {
    fn from(result: &TrainingResult) -> Self {
        Self {
            total_episodes: result.total_episodes,
            goals: result.goals,
            traps: result.traps,
            step_cap_hits: result.step_cap_hits,
            goal_rate: result.goal_rate,
            trap_rate: result.trap_rate,
            average_steps: result.average_steps,
            final_epsilon: result.final_epsilon,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a ExperimentConfig,
    training: SummaryStats,
    rewards: RewardStats,
    /// Reward history smoothed over the trailing window
    learning_curve: Vec<f64>,
    policy: &'a PolicyReport,
    rollout: &'a Rollout,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// JSON experiment configuration (defaults to the 3x4 world)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate α (0.0-1.0]
    #[arg(long, alias = "alpha")]
    pub learning_rate: Option<f64>,

    /// Discount factor γ [0.0-1.0]
    #[arg(long, alias = "gamma")]
    pub discount: Option<f64>,

    /// Initial exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Multiplicative epsilon decay per episode
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Penalty charged on every step
    #[arg(long)]
    pub step_cost: Option<f64>,

    /// Step cap for a single episode
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Print learning milestones (first goal, last trap)
    #[arg(long, default_value_t = false)]
    pub milestones: bool,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional CSV file for the per-episode reward history
    #[arg(long)]
    pub rewards_csv: Option<PathBuf>,

    /// Trailing window for the recent mean reward
    #[arg(long, default_value_t = 100)]
    pub window: usize,
}

impl TrainArgs {
    /// Load the base configuration and apply command-line overrides
    pub fn resolve_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.training.episodes = episodes;
        }
        if let Some(seed) = self.seed {
            config.training.seed = Some(seed);
        }
        if let Some(step_cost) = self.step_cost {
            config.training.step_cost = step_cost;
        }
        if let Some(max_steps) = self.max_steps {
            config.training.max_steps_per_episode = max_steps;
        }
        if let Some(value) = self.learning_rate {
            config.learning.learning_rate = value;
        }
        if let Some(value) = self.discount {
            config.learning.discount_factor = value;
        }
        if let Some(value) = self.epsilon {
            config.learning.initial_epsilon = value;
        }
        if let Some(value) = self.epsilon_decay {
            config.learning.epsilon_decay = value;
        }
        if let Some(value) = self.min_epsilon {
            config.learning.min_epsilon = value;
        }

        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let app = App::new(config).context("invalid configuration")?;

    let summary_target = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    print_section("Q-Learning Grid World");
    let world = app.world();
    let learning = &app.config().learning;
    let training = &app.config().training;
    print_kv("Grid", &format!("{}x{}", world.rows(), world.cols()));
    print_kv("Start", &world.start().to_string());
    print_kv("Episodes", &format_number(training.episodes));
    print_kv("Step cost", &training.step_cost.to_string());
    print_kv("Learning rate", &learning.learning_rate.to_string());
    print_kv("Discount", &learning.discount_factor.to_string());
    print_kv(
        "Epsilon",
        &format!(
            "{} (x{} per episode, floor {})",
            learning.initial_epsilon, learning.epsilon_decay, learning.min_epsilon
        ),
    );
    if let Some(seed) = training.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if !args.no_progress {
        observers.push(Box::new(ProgressObserver::new()));
    }
    if args.milestones {
        observers.push(Box::new(MilestoneObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to open observations file {}", path.display()))?;
        observers.push(Box::new(observer));
    }

    let run = app.train(observers).context("training failed")?;
    let rewards = RewardStats::from_history(&run.result.reward_history, args.window);

    print_section("Training Results");
    print_kv("Episodes", &format_number(run.result.total_episodes));
    print_rate("Goal", run.result.goals, run.result.goal_rate);
    print_rate("Trap", run.result.traps, run.result.trap_rate);
    if run.result.step_cap_hits > 0 {
        let share = run.result.step_cap_hits as f64 / run.result.total_episodes as f64;
        print_rate("Step cap hit", run.result.step_cap_hits, share);
    }
    print_kv("Average steps", &format!("{:.2}", run.result.average_steps));
    print_kv("Mean reward", &format!("{:.3} ± {:.3}", rewards.mean, rewards.std_dev));
    print_kv(
        &format!("Last {} mean", rewards.window),
        &format!("{:.3}", rewards.recent_mean),
    );
    print_kv("Final epsilon", &format!("{:.4}", run.result.final_epsilon));

    print_section("Learned Q-Table");
    print!("{}", run.report.render_table());
    println!();
    print!("{}", run.report.render_grid());

    print_subsection("Greedy rollout from start");
    let path = run
        .rollout
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ");
    println!("  {path}");
    let ending = match run.rollout.end {
        RolloutEnd::Terminal(kind) => format!("reached {kind:?} in {} steps", run.rollout.steps()),
        RolloutEnd::Loop => "greedy policy loops without reaching a terminal".to_string(),
        RolloutEnd::StepCap => "stopped at the step cap".to_string(),
    };
    println!("  {ending}");

    if let Some(path) = &args.rewards_csv {
        write_rewards_csv(path, &run.result.episodes)
            .with_context(|| format!("failed to write rewards CSV {}", path.display()))?;
        println!("\nReward history written to {}", path.display());
    }

    if let Some((summary_path, normalized)) = summary_target {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            config: app.config(),
            training: SummaryStats::from(&run.result),
            rewards,
            learning_curve: moving_average(&run.result.reward_history, args.window),
            policy: &run.report,
            rollout: &run.rollout,
        };

        let file = File::create(&summary_path)
            .with_context(|| format!("failed to create {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
