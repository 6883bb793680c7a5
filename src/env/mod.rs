//! # Environments
//!
//! The contract the Q-learning agent and the experiment runner need from a
//! discrete simulator, plus a FrozenLake grid world implementing it.
//!
//! - [`ActionSpace`]: knows its action count and can draw an action
//! - [`Environment`]: `reset` / `step` over integer states
//! - [`FrozenLake`]: slippery or deterministic frozen lake

pub mod frozen_lake;

pub use frozen_lake::{generate_random_map, FrozenLake, LakeMap, LakeAction, StepInfo, Tile, MAX_MAP_ATTEMPTS};

use crate::error::Result;
use crate::types::{ActionIndex, StateIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A finite set of actions that can be sampled from.
pub trait ActionSpace {
    /// Number of available actions
    fn n(&self) -> usize;

    /// Draw one action according to the space's own sampling policy
    fn sample(&mut self) -> ActionIndex;

    /// Check whether an action index belongs to this space
    fn contains(&self, action: ActionIndex) -> bool {
        action < self.n()
    }
}

/// Uniform discrete action space `{0, ..., n - 1}` with its own generator.
#[derive(Debug, Clone)]
pub struct Discrete {
    n: usize,
    rng: StdRng,
}

impl Discrete {
    pub fn new(n: usize, seed: u64) -> Self {
        Discrete {
            n,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reseed the sampling generator
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl ActionSpace for Discrete {
    fn n(&self) -> usize {
        self.n
    }

    fn sample(&mut self) -> ActionIndex {
        self.rng.gen_range(0..self.n)
    }
}

/// Outcome of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<I> {
    pub state: StateIndex,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}

impl<I> Step<I> {
    /// The episode is over, either naturally or by the time limit
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// A discrete-state, discrete-action episodic environment.
pub trait Environment {
    /// Auxiliary diagnostic payload returned with every observation
    type Info;

    /// Action space type exposed to agents
    type Space: ActionSpace;

    /// Start a new episode and return the initial state
    fn reset(&mut self) -> (StateIndex, Self::Info);

    /// Apply an action and advance the simulation by one step
    fn step(&mut self, action: ActionIndex) -> Result<Step<Self::Info>>;

    /// Reseed every generator the environment owns
    fn seed(&mut self, seed: u64);

    /// Mutable access to the action space, for sampling
    fn action_space(&mut self) -> &mut Self::Space;

    /// Number of distinct states
    fn observation_count(&self) -> usize;

    /// Number of distinct actions
    fn action_count(&self) -> usize;
}
