//! # Tabular Reinforcement Learning Agents
//!
//! This module provides the Q-learning agent and the trait the episode loop
//! drives it through.
//!
//! ## Core Concepts
//!
//! - **Value table**: one estimate per (state, action) pair, all zero at first
//! - **Epsilon-greedy**: explore with probability epsilon, otherwise act greedily
//! - **TD update**: move the estimate towards `r + gamma * max Q(s', .)`
//!
//! ## Example Usage
//!
//! ```rust
//! use frostlake::agent::QLearningAgentBuilder;
//! use frostlake::env::Discrete;
//!
//! let mut agent = QLearningAgentBuilder::new()
//!     .state_count(16)
//!     .action_count(4)
//!     .learning_rate(0.8)
//!     .discount_factor(0.95)
//!     .fixed_epsilon(0.1)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut actions = Discrete::new(4, 42);
//! let action = agent.select_action(0, &mut actions).unwrap();
//! agent.update(0, action, 0.0, false, 4).unwrap();
//! agent.decay_epsilon();
//! ```

pub mod config;
pub mod traits;

mod q_learning;

pub use config::AgentConfig;
pub use q_learning::{QLearningAgent, QLearningAgentBuilder};
pub use traits::TabularAgent;
