//! Experiment configuration.
//!
//! [`ExperimentParams`] holds everything the runner needs: episode and run
//! counts, the lake sizes to sweep, and the agent hyper-parameters it turns
//! into an [`AgentConfig`] per run. Parameters can be loaded from a JSON file;
//! missing fields take their defaults.

use crate::agent::AgentConfig;
use crate::error::{QLearningError, Result};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentParams {
    /// Episodes per run
    pub total_episodes: usize,
    pub learning_rate: f32,
    /// Discount factor (gamma)
    pub discount_factor: f32,
    pub initial_epsilon: f32,
    /// Subtracted from epsilon after every episode
    pub epsilon_decay: f32,
    pub final_epsilon: f32,
    /// Side lengths of the square lakes to train on
    pub map_sizes: Vec<usize>,
    /// Base seed; run `r` uses `seed + r` for its agent
    pub seed: u64,
    /// Intended move succeeds only one time in three when set
    pub is_slippery: bool,
    /// Independent runs per map size
    pub n_runs: usize,
    /// Probability that a generated tile is frozen
    pub proba_frozen: f64,
    pub max_episode_steps: usize,
    /// Where reports and exports are written, if anywhere
    pub savefig_folder: Option<PathBuf>,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        ExperimentParams {
            total_episodes: 2000,
            learning_rate: 0.8,
            discount_factor: 0.95,
            initial_epsilon: 1.0,
            epsilon_decay: 0.0009,
            final_epsilon: 0.1,
            map_sizes: vec![4, 7, 9, 11],
            seed: 123,
            is_slippery: false,
            n_runs: 20,
            proba_frozen: 0.9,
            max_episode_steps: 100,
            savefig_folder: None,
        }
    }
}

impl ExperimentParams {
    /// Load parameters from a JSON file and validate them
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let params: ExperimentParams = serde_json::from_str(&data)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_episodes == 0 {
            return Err(QLearningError::invalid_configuration("total_episodes", "must be greater than 0"));
        }
        if self.n_runs == 0 {
            return Err(QLearningError::invalid_configuration("n_runs", "must be greater than 0"));
        }
        if self.max_episode_steps == 0 {
            return Err(QLearningError::invalid_configuration("max_episode_steps", "must be greater than 0"));
        }
        if self.map_sizes.is_empty() {
            return Err(QLearningError::invalid_configuration("map_sizes", "at least one map size is required"));
        }
        if let Some(&size) = self.map_sizes.iter().find(|&&s| s < 2) {
            return Err(QLearningError::InvalidConfiguration {
                name: "map_sizes".to_string(),
                reason: format!("map size must be at least 2, got {}", size),
            });
        }
        if !(self.proba_frozen > 0.0 && self.proba_frozen <= 1.0) {
            return Err(QLearningError::InvalidConfiguration {
                name: "proba_frozen".to_string(),
                reason: format!("must be in (0, 1], got {}", self.proba_frozen),
            });
        }
        // Agent-level parameters are checked with a representative config
        self.agent_config(1, 1, 0).validate()
    }

    /// Agent configuration for one run on an environment of the given size
    pub fn agent_config(&self, state_count: usize, action_count: usize, run: usize) -> AgentConfig {
        AgentConfig {
            learning_rate: self.learning_rate,
            discount_factor: self.discount_factor,
            initial_epsilon: self.initial_epsilon,
            final_epsilon: self.final_epsilon,
            epsilon_decay: self.epsilon_decay,
            state_count,
            action_count,
            seed: self.seed.wrapping_add(run as u64),
        }
    }
}
