//! # Experiment Orchestration
//!
//! Drives agents through episodes, repeats whole trainings over several
//! independent runs, and sweeps lake sizes.
//!
//! Each run gets a fresh [`QLearningAgent`] seeded with `seed + run`, and the
//! environment is reseeded with the same value before the run starts, so a
//! run's outcome does not depend on the runs before it. Map sizes are trained
//! in parallel; each size owns its environment and agents.

use crate::agent::{QLearningAgent, TabularAgent};
use crate::env::{generate_random_map, ActionSpace, Environment, FrozenLake, LakeMap};
use crate::error::{QLearningError, Result};
use crate::metrics::check_numerical_issues;
use crate::params::ExperimentParams;
use crate::types::{ActionIndex, StateIndex, Transition};
use log::{debug, info, warn};
use ndarray::parallel::prelude::*;
use ndarray::{s, Array2, Array3};

/// Reward and length of one episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub total_reward: f32,
    pub steps: usize,
    pub terminated: bool,
}

/// How often each state was acted in and each action chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitCounts {
    /// Indexed by state
    pub states: Vec<usize>,
    /// Indexed by action
    pub actions: Vec<usize>,
}

impl VisitCounts {
    pub fn new(state_count: usize, action_count: usize) -> Self {
        VisitCounts {
            states: vec![0; state_count],
            actions: vec![0; action_count],
        }
    }

    pub fn record(&mut self, state: StateIndex, action: ActionIndex) {
        if let Some(count) = self.states.get_mut(state) {
            *count += 1;
        }
        if let Some(count) = self.actions.get_mut(action) {
            *count += 1;
        }
    }

    /// Number of recorded steps
    pub fn total(&self) -> usize {
        self.actions.iter().sum()
    }
}

/// Raw output of training on one environment
#[derive(Debug, Clone)]
pub struct RunResults {
    /// Total reward, shape `(episodes, runs)`
    pub rewards: Array2<f32>,
    /// Steps taken, shape `(episodes, runs)`
    pub steps: Array2<f32>,
    pub episodes: Vec<usize>,
    /// Final value table of every run, shape `(runs, states, actions)`
    pub q_tables: Array3<f32>,
    /// State and action counts across all runs
    pub visits: VisitCounts,
    /// TD-error log of the last run
    pub training_error: Vec<f32>,
}

impl RunResults {
    pub fn n_runs(&self) -> usize {
        self.rewards.ncols()
    }

    pub fn n_episodes(&self) -> usize {
        self.rewards.nrows()
    }

    /// Value table averaged over runs
    pub fn mean_q_table(&self) -> Array2<f32> {
        self.q_tables
            .mean_axis(ndarray::Axis(0))
            .unwrap_or_else(|| Array2::zeros((self.q_tables.shape()[1], self.q_tables.shape()[2])))
    }
}

/// Results for one lake size of a sweep
#[derive(Debug, Clone)]
pub struct MapSizeResults {
    pub map_size: usize,
    pub map: LakeMap,
    pub results: RunResults,
}

/// Play one training episode: act, step, learn until the episode ends.
///
/// Every step is counted in `visits`. Exploration is not decayed here.
pub fn run_episode<A, E>(
    agent: &mut A,
    env: &mut E,
    visits: &mut VisitCounts,
) -> Result<EpisodeOutcome>
where
    A: TabularAgent,
    E: Environment,
{
    let (mut state, _) = env.reset();
    let mut total_reward = 0.0;
    let mut steps = 0;

    loop {
        let action = agent.select_action(state, env.action_space())?;
        let step = env.step(action)?;
        visits.record(state, action);
        agent.learn(&Transition::new(state, action, step.reward, step.terminated, step.state))?;

        total_reward += step.reward;
        steps += 1;
        state = step.state;

        if step.done() {
            return Ok(EpisodeOutcome {
                total_reward,
                steps,
                terminated: step.terminated,
            });
        }
    }
}

/// Train `params.n_runs` independent agents on `env`.
///
/// Before run `r` the environment is reseeded with `params.seed + r`, the
/// seed of that run's agent.
pub fn run_env<E: Environment>(params: &ExperimentParams, env: &mut E) -> Result<RunResults> {
    params.validate()?;

    let state_count = env.observation_count();
    let action_count = env.action_count();
    if env.action_space().n() != action_count {
        return Err(QLearningError::invalid_configuration(
            "action_space",
            "action space size disagrees with the environment's action count",
        ));
    }

    let n_episodes = params.total_episodes;
    let n_runs = params.n_runs;

    let mut rewards: Array2<f32> = Array2::zeros((n_episodes, n_runs));
    let mut steps: Array2<f32> = Array2::zeros((n_episodes, n_runs));
    let mut q_tables: Array3<f32> = Array3::zeros((n_runs, state_count, action_count));
    let mut visits = VisitCounts::new(state_count, action_count);
    let mut training_error = Vec::new();

    for run in 0..n_runs {
        let config = params.agent_config(state_count, action_count, run);
        env.seed(config.seed);
        let mut agent = QLearningAgent::new(config)?;

        for episode in 0..n_episodes {
            let outcome = run_episode(&mut agent, env, &mut visits)?;
            agent.decay_epsilon();

            rewards[[episode, run]] = outcome.total_reward;
            steps[[episode, run]] = outcome.steps as f32;

            debug!(
                "run {} episode {}: reward={} steps={} epsilon={:.4}",
                run, episode, outcome.total_reward, outcome.steps, agent.epsilon()
            );
        }

        let (has_issue, nan_count, inf_count) = check_numerical_issues(agent.q_table());
        if has_issue {
            warn!(
                "Run {} value table is not finite: {} NaN, {} infinite entries",
                run, nan_count, inf_count
            );
        }
        q_tables.slice_mut(s![run, .., ..]).assign(&agent.q_table());

        let run_rewards = rewards.column(run);
        info!(
            "Run {}/{} finished: {} successful episodes out of {}, final epsilon {:.3}",
            run + 1,
            n_runs,
            run_rewards.iter().filter(|&&r| r > 0.0).count(),
            n_episodes,
            agent.epsilon(),
        );

        if run + 1 == n_runs {
            training_error = agent.training_error().to_vec();
        }
    }

    Ok(RunResults {
        rewards,
        steps,
        episodes: (0..n_episodes).collect(),
        q_tables,
        visits,
        training_error,
    })
}

/// Build the lake used for a given size of the sweep
pub fn make_lake(params: &ExperimentParams, map_size: usize) -> Result<FrozenLake> {
    let map = generate_random_map(map_size, params.proba_frozen, params.seed)?;
    Ok(FrozenLake::new(map, params.is_slippery)
        .with_max_episode_steps(params.max_episode_steps)
        .with_seed(params.seed))
}

/// Train on a generated lake for every entry of `params.map_sizes`.
///
/// Sizes run in parallel; the output keeps the order of `map_sizes`.
pub fn run_map_sizes(params: &ExperimentParams) -> Result<Vec<MapSizeResults>> {
    params.validate()?;

    params
        .map_sizes
        .par_iter()
        .map(|&map_size| -> Result<MapSizeResults> {
            info!("Map size: {}x{}", map_size, map_size);
            let mut env = make_lake(params, map_size)?;
            let results = run_env(params, &mut env)?;
            Ok(MapSizeResults {
                map_size,
                map: env.map().clone(),
                results,
            })
        })
        .collect()
}
