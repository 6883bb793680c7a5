//! # Frostlake - Tabular Q-Learning on FrozenLake
//!
//! Frostlake trains tabular Q-learning agents on a FrozenLake grid world and
//! summarizes how learning behaves across repeated runs and lake sizes.
//!
//! ## Key Features
//!
//! - **Q-Learning Agent**: zero-initialized value table, epsilon-greedy policy
//!   with a per-agent seeded generator, one-step TD updates
//! - **FrozenLake**: random solvable maps, optional slippery ice, time limit
//! - **Experiments**: independent runs per lake size, sizes trained in parallel
//! - **Reporting**: flat result tables, ASCII plots, learned policy maps,
//!   CSV/JSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frostlake::experiment::run_map_sizes;
//! use frostlake::metrics::post_process;
//! use frostlake::params::ExperimentParams;
//! use frostlake::visualization::plot_rewards_and_steps;
//!
//! let params = ExperimentParams {
//!     total_episodes: 500,
//!     n_runs: 5,
//!     map_sizes: vec![4, 7],
//!     ..Default::default()
//! };
//!
//! let mut rewards = Vec::new();
//! let mut steps = Vec::new();
//! for sweep in run_map_sizes(&params).unwrap() {
//!     let (r, s) = post_process(&sweep.results, sweep.map_size);
//!     rewards.extend(r);
//!     steps.extend(s);
//! }
//! println!("{}", plot_rewards_and_steps(&rewards, &steps, 60, 15));
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - Q-learning agent, its configuration and the agent trait
//! - [`env`] - Environment contract and the FrozenLake grid world
//! - [`error`] - Error types and result handling
//! - [`experiment`] - Episode loop, repeated runs, map size sweeps
//! - [`metrics`] - Post-processing into tables, summary statistics
//! - [`params`] - Experiment configuration
//! - [`play`] - Rolling out episodes for inspection
//! - [`types`] - Index aliases and the transition record
//! - [`visualization`] - ASCII plots, policy maps and exports

pub mod agent;
pub mod env;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod params;
pub mod play;
pub mod types;
pub mod visualization;
