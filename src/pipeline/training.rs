//! Training pipeline: the episodic Q-learning loop

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    app::config::check_range,
    grid::{GridWorld, TerminalKind},
    ports::Observer,
    q_learning::{QLearningAgent, Selection},
    types::Cell,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes (no early stopping)
    pub episodes: usize,

    /// Penalty subtracted from the reward of every step, wall bumps included
    pub step_cost: f64,

    /// Safety bound on the length of a single episode
    pub max_steps_per_episode: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        check_range(
            "step_cost",
            self.step_cost,
            |_| true,
            "a finite number",
        )?;
        if self.max_steps_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps_per_episode must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            step_cost: 0.01,
            max_steps_per_episode: 10_000,
            seed: None,
        }
    }
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// Entered a terminal cell with positive reward
    Goal,
    /// Entered a terminal cell with zero or negative reward
    Trap,
    /// Hit `max_steps_per_episode` without reaching a terminal cell
    StepCapExceeded,
}

impl From<TerminalKind> for EpisodeOutcome {
    fn from(kind: TerminalKind) -> Self {
        match kind {
            TerminalKind::Goal => EpisodeOutcome::Goal,
            TerminalKind::Trap => EpisodeOutcome::Trap,
        }
    }
}

/// One transition of an episode, as reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Step number within the episode (0-based)
    pub step: usize,
    pub cell: Cell,
    pub selection: Selection,
    pub next_cell: Cell,
    /// Terminal reward of `next_cell` minus the step cost
    pub reward: f64,
    /// Q(cell, action) after the update
    pub q_value: f64,
}

/// Summary of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode index (0-based)
    pub episode: usize,
    pub total_reward: f64,
    pub steps: usize,
    pub outcome: EpisodeOutcome,
    /// Exploration rate used during the episode
    pub epsilon: f64,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub total_episodes: usize,

    /// Episodes ending in a goal cell
    pub goals: usize,

    /// Episodes ending in a trap cell
    pub traps: usize,

    /// Episodes cut off by the step cap
    pub step_cap_hits: usize,

    pub goal_rate: f64,
    pub trap_rate: f64,
    pub average_steps: f64,

    /// Exploration rate after the last decay
    pub final_epsilon: f64,

    /// Total reward of every episode, in order
    pub reward_history: Vec<f64>,

    /// Per-episode records (not part of the JSON summary)
    #[serde(skip)]
    pub episodes: Vec<EpisodeRecord>,
}

impl TrainingResult {
    /// Build a result from the episode records of a run
    pub fn from_records(episodes: Vec<EpisodeRecord>, final_epsilon: f64) -> Self {
        let total_episodes = episodes.len();
        let count = |outcome| episodes.iter().filter(|r| r.outcome == outcome).count();
        let goals = count(EpisodeOutcome::Goal);
        let traps = count(EpisodeOutcome::Trap);
        let step_cap_hits = count(EpisodeOutcome::StepCapExceeded);
        let rate = |n: usize| {
            if total_episodes > 0 {
                n as f64 / total_episodes as f64
            } else {
                0.0
            }
        };
        let average_steps = if total_episodes > 0 {
            episodes.iter().map(|r| r.steps).sum::<usize>() as f64 / total_episodes as f64
        } else {
            0.0
        };

        Self {
            total_episodes,
            goals,
            traps,
            step_cap_hits,
            goal_rate: rate(goals),
            trap_rate: rate(traps),
            average_steps,
            final_epsilon,
            reward_history: episodes.iter().map(|r| r.total_reward).collect(),
            episodes,
        }
    }

    /// Exploration rate used in each episode, in order
    pub fn epsilon_history(&self) -> Vec<f64> {
        self.episodes.iter().map(|r| r.epsilon).collect()
    }
}

/// Training pipeline for a Q-learning agent in a fixed grid world
pub struct TrainingPipeline {
    world: GridWorld,
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(world: GridWorld, config: TrainingConfig) -> Self {
        Self {
            world,
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes, training `agent` in place
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        tracing::info!(
            episodes = self.config.episodes,
            rows = self.world.rows(),
            cols = self.world.cols(),
            start = %self.world.start(),
            epsilon = agent.epsilon(),
            "training started"
        );

        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let record = self.run_episode(episode, agent)?;

            // Notify observers of episode end
            for observer in &mut self.observers {
                observer.on_episode_end(&record)?;
            }

            agent.end_episode();
            records.push(record);
        }

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::from_records(records, agent.epsilon());
        if result.step_cap_hits > 0 {
            tracing::warn!(
                episodes = result.step_cap_hits,
                max_steps = self.config.max_steps_per_episode,
                "episodes stopped at the step cap without reaching a terminal cell"
            );
        }
        tracing::info!(
            goals = result.goals,
            traps = result.traps,
            step_cap_hits = result.step_cap_hits,
            final_epsilon = result.final_epsilon,
            "training finished"
        );

        Ok(result)
    }

    fn run_episode(&mut self, episode: usize, agent: &mut QLearningAgent) -> Result<EpisodeRecord> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let epsilon = agent.epsilon();
        let mut cell = self.world.start();
        let mut total_reward = 0.0;
        let mut steps = 0;

        let outcome = loop {
            // Terminal cells are absorbing: no update from them
            if let Some(kind) = self.world.terminal_kind(cell) {
                break EpisodeOutcome::from(kind);
            }
            if steps >= self.config.max_steps_per_episode {
                break EpisodeOutcome::StepCapExceeded;
            }

            let selection = agent.select_action(cell);
            let action = selection.action();
            let next_cell = self.world.attempt_move(cell, action);
            let reward = self.world.reward_of(next_cell) - self.config.step_cost;
            let q_value = agent.learn(cell, action, reward, next_cell);
            total_reward += reward;

            let event = StepEvent {
                step: steps,
                cell,
                selection,
                next_cell,
                reward,
                q_value,
            };
            for observer in &mut self.observers {
                observer.on_step(episode, &event)?;
            }

            steps += 1;
            cell = next_cell;
        };

        tracing::debug!(episode, steps, total_reward, ?outcome, epsilon, "episode finished");

        Ok(EpisodeRecord {
            episode,
            total_reward,
            steps,
            outcome,
            epsilon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::ScriptedRandom, app::LearningConfig, types::Action};

    fn corridor() -> GridWorld {
        // S . G
        GridWorld::builder()
            .dimensions(1, 3)
            .goal(Cell::new(0, 2), 1.0)
            .start(Cell::new(0, 0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_greedy_walk_through_corridor() {
        let world = corridor();
        let learning = LearningConfig::default().with_constant_epsilon(0.0);
        let mut agent = QLearningAgent::for_world(&world, &learning);
        let config = TrainingConfig {
            episodes: 1,
            step_cost: 0.01,
            max_steps_per_episode: 100,
            seed: None,
        };
        let mut pipeline = TrainingPipeline::new(world, config);
        let result = pipeline.run(&mut agent).unwrap();

        // Up, Down, Left all bump (each tried once as ties resolve), then Right twice
        let record = result.episodes[0];
        assert_eq!(record.outcome, EpisodeOutcome::Goal);
        assert!(record.steps >= 2);
        assert_eq!(result.reward_history.len(), 1);
        assert!(agent.q_table().value(Cell::new(0, 1), Action::Right) > 0.0);
    }

    #[test]
    fn test_scripted_exploration_path() {
        let world = corridor();
        let learning = LearningConfig::default().with_constant_epsilon(1.0);
        // Always explore, always pick Right (index 3)
        let mut agent = QLearningAgent::for_world(&world, &learning)
            .with_random_source(Box::new(ScriptedRandom::new(vec![0.0], vec![3])));
        let config = TrainingConfig {
            episodes: 1,
            ..TrainingConfig::default()
        };
        let result = TrainingPipeline::new(world, config).run(&mut agent).unwrap();

        let record = result.episodes[0];
        assert_eq!(record.steps, 2);
        assert_eq!(record.outcome, EpisodeOutcome::Goal);
        assert!((record.total_reward - (1.0 - 0.02)).abs() < 1e-12);
        // Q((0,1), right) = 0.9 * 0.99
        assert!((agent.q_table().value(Cell::new(0, 1), Action::Right) - 0.891).abs() < 1e-12);
        // Q((0,0), right) = 0.9 * (-0.01 + 0.5 * 0) since (0,1) was still zero
        assert!((agent.q_table().value(Cell::new(0, 0), Action::Right) + 0.009).abs() < 1e-12);
    }

    #[test]
    fn test_zero_episodes() {
        let world = corridor();
        let mut agent = QLearningAgent::for_world(&world, &LearningConfig::default());
        let config = TrainingConfig {
            episodes: 0,
            ..TrainingConfig::default()
        };
        let result = TrainingPipeline::new(world, config).run(&mut agent).unwrap();
        assert_eq!(result.total_episodes, 0);
        assert_eq!(result.goal_rate, 0.0);
        assert_eq!(result.final_epsilon, 1.0);
    }

    #[test]
    fn test_validate_rejects_zero_step_cap() {
        let config = TrainingConfig {
            max_steps_per_episode: 0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());
        let config = TrainingConfig {
            step_cost: f64::INFINITY,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
