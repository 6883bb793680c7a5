use crate::error::{QLearningError, Result};
use serde::{Serialize, Deserialize};

/// Immutable parameters of a [`QLearningAgent`](super::QLearningAgent).
///
/// Only what the agent itself needs lives here. Experiment-level knobs such
/// as episode counts or map sizes belong to
/// [`ExperimentParams`](crate::params::ExperimentParams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size of the TD update, in (0, 1]
    pub learning_rate: f32,
    /// Discount factor (gamma), in [0, 1]
    pub discount_factor: f32,
    /// Exploration probability at construction, in [0, 1]
    pub initial_epsilon: f32,
    /// Floor of the exploration probability, in [0, initial_epsilon]
    pub final_epsilon: f32,
    /// Amount subtracted from epsilon after every episode
    pub epsilon_decay: f32,
    /// Number of rows of the value table
    pub state_count: usize,
    /// Number of columns of the value table
    pub action_count: usize,
    /// Seed for the agent's private generator
    pub seed: u64,
}

impl AgentConfig {
    /// Check every parameter, reporting the first one out of range.
    pub fn validate(&self) -> Result<()> {
        if self.state_count == 0 {
            return Err(QLearningError::invalid_configuration("state_count", "must be greater than 0"));
        }
        if self.action_count == 0 {
            return Err(QLearningError::invalid_configuration("action_count", "must be greater than 0"));
        }
        // NaN fails every comparison below
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(QLearningError::InvalidConfiguration {
                name: "learning_rate".to_string(),
                reason: format!("must be in (0, 1], got {}", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(QLearningError::InvalidConfiguration {
                name: "discount_factor".to_string(),
                reason: format!("must be in [0, 1], got {}", self.discount_factor),
            });
        }
        if !(0.0..=1.0).contains(&self.initial_epsilon) {
            return Err(QLearningError::InvalidConfiguration {
                name: "initial_epsilon".to_string(),
                reason: format!("must be in [0, 1], got {}", self.initial_epsilon),
            });
        }
        if !(0.0..=1.0).contains(&self.final_epsilon) {
            return Err(QLearningError::InvalidConfiguration {
                name: "final_epsilon".to_string(),
                reason: format!("must be in [0, 1], got {}", self.final_epsilon),
            });
        }
        if self.initial_epsilon < self.final_epsilon {
            return Err(QLearningError::invalid_configuration(
                "final_epsilon",
                "must not exceed initial_epsilon",
            ));
        }
        if !(self.epsilon_decay >= 0.0 && self.epsilon_decay.is_finite()) {
            return Err(QLearningError::InvalidConfiguration {
                name: "epsilon_decay".to_string(),
                reason: format!("must be finite and >= 0, got {}", self.epsilon_decay),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            learning_rate: 0.8,
            discount_factor: 0.95,
            initial_epsilon: 1.0,
            final_epsilon: 0.1,
            epsilon_decay: 0.001,
            state_count: 16,
            action_count: 4,
            seed: 123,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_invalid(config: AgentConfig, field: &str) {
        match config.validate() {
            Err(QLearningError::InvalidConfiguration { name, .. }) => assert_eq!(name, field),
            other => panic!("expected invalid '{}', got {:?}", field, other),
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_each_bad_parameter() {
        expect_invalid(AgentConfig { state_count: 0, ..Default::default() }, "state_count");
        expect_invalid(AgentConfig { action_count: 0, ..Default::default() }, "action_count");
        expect_invalid(AgentConfig { learning_rate: 0.0, ..Default::default() }, "learning_rate");
        expect_invalid(AgentConfig { learning_rate: 1.5, ..Default::default() }, "learning_rate");
        expect_invalid(AgentConfig { learning_rate: f32::NAN, ..Default::default() }, "learning_rate");
        expect_invalid(AgentConfig { discount_factor: -0.1, ..Default::default() }, "discount_factor");
        expect_invalid(AgentConfig { initial_epsilon: 1.1, ..Default::default() }, "initial_epsilon");
        expect_invalid(AgentConfig { final_epsilon: -0.5, ..Default::default() }, "final_epsilon");
        expect_invalid(
            AgentConfig { initial_epsilon: 0.05, final_epsilon: 0.1, ..Default::default() },
            "final_epsilon",
        );
        expect_invalid(AgentConfig { epsilon_decay: -0.01, ..Default::default() }, "epsilon_decay");
        expect_invalid(AgentConfig { epsilon_decay: f32::INFINITY, ..Default::default() }, "epsilon_decay");
    }

    #[test]
    fn test_boundaries_are_accepted() {
        let config = AgentConfig {
            learning_rate: 1.0,
            discount_factor: 0.0,
            initial_epsilon: 0.0,
            final_epsilon: 0.0,
            epsilon_decay: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
