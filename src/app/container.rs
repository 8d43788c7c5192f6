//! Application container wiring configuration to domain objects.
//!
//! [`App`] validates an [`ExperimentConfig`] once, then hands out agents and
//! pipelines built from it. [`App::train`] runs the whole experiment and
//! returns everything the reports need.

use super::config::ExperimentConfig;
use crate::{
    Result,
    grid::GridWorld,
    pipeline::{TrainingPipeline, TrainingResult},
    ports::Observer,
    q_learning::QLearningAgent,
    report::{PolicyReport, Rollout, greedy_rollout},
};

/// Validated experiment.
///
/// # Examples
///
/// ```
/// use gridworld::app::{App, ExperimentConfig};
///
/// let app = App::new(ExperimentConfig::default().with_seed(42).with_episodes(200))?;
/// let run = app.train(Vec::new())?;
/// assert_eq!(run.result.reward_history.len(), 200);
/// # Ok::<(), gridworld::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct App {
    config: ExperimentConfig,
    world: GridWorld,
}

/// Everything produced by one training run
#[derive(Debug)]
pub struct TrainedRun {
    pub agent: QLearningAgent,
    pub result: TrainingResult,
    pub report: PolicyReport,
    pub rollout: Rollout,
}

impl App {
    /// Validate the configuration. All configuration errors surface here.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        let world = config.validate()?;
        Ok(Self { config, world })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Fresh agent sized for the world, seeded if the config has a seed
    pub fn create_agent(&self) -> QLearningAgent {
        let agent = QLearningAgent::for_world(&self.world, &self.config.learning);
        match self.config.training.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }

    /// Pipeline over the world with the given observers
    pub fn create_pipeline(&self, observers: Vec<Box<dyn Observer>>) -> TrainingPipeline {
        observers.into_iter().fold(
            TrainingPipeline::new(self.world.clone(), self.config.training.clone()),
            TrainingPipeline::with_observer,
        )
    }

    /// Train a fresh agent and derive the policy report and greedy rollout
    pub fn train(&self, observers: Vec<Box<dyn Observer>>) -> Result<TrainedRun> {
        let mut agent = self.create_agent();
        let result = self.create_pipeline(observers).run(&mut agent)?;
        let report = PolicyReport::new(&self.world, agent.q_table());
        let rollout = greedy_rollout(
            &self.world,
            agent.q_table(),
            self.config.training.max_steps_per_episode,
        );
        Ok(TrainedRun {
            agent,
            result,
            report,
            rollout,
        })
    }
}
