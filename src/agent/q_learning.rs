use super::config::AgentConfig;
use super::traits::TabularAgent;
use crate::env::ActionSpace;
use crate::error::{QLearningError, Result};
use crate::types::{ActionIndex, StateIndex, Transition};
use log::debug;
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tabular Q-learning agent with an epsilon-greedy policy.
///
/// The agent owns a `state_count x action_count` table of value estimates,
/// its current exploration rate, a log of every TD error it has seen, and a
/// private generator seeded from [`AgentConfig::seed`]. Two agents built from
/// the same configuration make identical decisions when fed identical
/// transitions.
///
/// # Example
///
/// ```
/// use frostlake::agent::{AgentConfig, QLearningAgent};
///
/// let config = AgentConfig {
///     learning_rate: 0.5,
///     discount_factor: 0.9,
///     state_count: 3,
///     action_count: 2,
///     ..Default::default()
/// };
/// let mut agent = QLearningAgent::new(config).unwrap();
///
/// agent.update(0, 1, 10.0, true, 2).unwrap();
/// assert_eq!(agent.q_table()[[0, 1]], 5.0);
///
/// agent.update(2, 0, 0.0, false, 0).unwrap();
/// assert!((agent.q_table()[[2, 0]] - 2.25).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    config: AgentConfig,

    /// Value estimates, indexed by `[state, action]`
    q_table: Array2<f32>,

    /// Current exploration rate
    epsilon: f32,

    /// TD error of every update, in call order
    training_error: Vec<f32>,

    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with a zeroed value table.
    ///
    /// Fails with [`QLearningError::InvalidConfiguration`] when any parameter
    /// is out of range; nothing is allocated in that case.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            "Creating Q-learning agent: {} states x {} actions, lr={}, gamma={}, epsilon={}->{} (step {}), seed={}",
            config.state_count,
            config.action_count,
            config.learning_rate,
            config.discount_factor,
            config.initial_epsilon,
            config.final_epsilon,
            config.epsilon_decay,
            config.seed,
        );

        Ok(QLearningAgent {
            q_table: Array2::zeros((config.state_count, config.action_count)),
            epsilon: config.initial_epsilon,
            training_error: Vec::new(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Select an action using the epsilon-greedy policy.
    ///
    /// With probability epsilon the action is drawn from `action_space`.
    /// Otherwise the greedy action is returned; a row whose entries are all
    /// equal carries no preference, so it is also delegated to the sampler.
    /// Among several maxima of an informative row the lowest index wins.
    pub fn select_action<S: ActionSpace + ?Sized>(
        &mut self,
        state: StateIndex,
        action_space: &mut S,
    ) -> Result<ActionIndex> {
        self.check_state(state)?;

        let explore_exploit_tradeoff: f32 = self.rng.gen();
        if explore_exploit_tradeoff < self.epsilon {
            return Ok(action_space.sample());
        }

        match self.greedy_action(state)? {
            Some(action) => Ok(action),
            None => Ok(action_space.sample()),
        }
    }

    /// Greedy action for `state`, or `None` when every action has the same value.
    ///
    /// Deterministic and consumes no randomness.
    pub fn greedy_action(&self, state: StateIndex) -> Result<Option<ActionIndex>> {
        self.check_state(state)?;
        let row = self.q_table.row(state);

        let max = row_max(row);
        let min = row.iter().copied().fold(f32::INFINITY, f32::min);
        if max == min {
            return Ok(None);
        }

        let mut best: Option<(ActionIndex, f32)> = None;
        for (action, &value) in row.iter().enumerate() {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ if value.is_nan() => {}
                _ => best = Some((action, value)),
            }
        }
        Ok(best.map(|(action, _)| action))
    }

    /// One-step Q-learning update.
    ///
    /// `Q(s,a) += lr * (r + gamma * max_a' Q(s',a') - Q(s,a))`, where the
    /// bootstrap term is dropped when the transition is terminal. Returns the
    /// TD error, which is also appended to the training error log.
    pub fn update(
        &mut self,
        state: StateIndex,
        action: ActionIndex,
        reward: f32,
        terminated: bool,
        next_state: StateIndex,
    ) -> Result<f32> {
        self.check_state(state)?;
        self.check_state(next_state)?;
        self.check_action(action)?;

        let next_q_value = if terminated {
            0.0
        } else {
            row_max(self.q_table.row(next_state))
        };
        let temporal_difference =
            reward + self.config.discount_factor * next_q_value - self.q_table[[state, action]];

        self.q_table[[state, action]] += self.config.learning_rate * temporal_difference;
        self.training_error.push(temporal_difference);

        Ok(temporal_difference)
    }

    /// Lower epsilon by the decay step, never going below the final value.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = self.config.final_epsilon.max(self.epsilon - self.config.epsilon_decay);
    }

    /// Zero the value table. Epsilon and the error log are left as they are.
    pub fn reset_table(&mut self) {
        self.q_table.fill(0.0);
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> ArrayView2<f32> {
        self.q_table.view()
    }

    /// TD errors of all updates so far, oldest first
    pub fn training_error(&self) -> &[f32] {
        &self.training_error
    }

    pub fn state_count(&self) -> usize {
        self.config.state_count
    }

    pub fn action_count(&self) -> usize {
        self.config.action_count
    }

    fn check_state(&self, state: StateIndex) -> Result<()> {
        if state >= self.config.state_count {
            return Err(QLearningError::invalid_state(state, self.config.state_count));
        }
        Ok(())
    }

    fn check_action(&self, action: ActionIndex) -> Result<()> {
        if action >= self.config.action_count {
            return Err(QLearningError::invalid_action(action, self.config.action_count));
        }
        Ok(())
    }
}

fn row_max(row: ArrayView1<f32>) -> f32 {
    row.iter().copied().fold(f32::NEG_INFINITY, f32::max)
}

impl TabularAgent for QLearningAgent {
    fn select_action<S: ActionSpace + ?Sized>(
        &mut self,
        state: StateIndex,
        action_space: &mut S,
    ) -> Result<ActionIndex> {
        QLearningAgent::select_action(self, state, action_space)
    }

    fn learn(&mut self, transition: &Transition) -> Result<f32> {
        self.update(
            transition.state,
            transition.action,
            transition.reward,
            transition.terminated,
            transition.next_state,
        )
    }

    fn decay_exploration(&mut self) {
        self.decay_epsilon();
    }

    fn reset(&mut self) {
        self.reset_table();
    }

    fn exploration_rate(&self) -> Option<f32> {
        Some(self.epsilon)
    }
}

/// Builder pattern for QLearningAgent
pub struct QLearningAgentBuilder {
    config: AgentConfig,
}

impl QLearningAgentBuilder {
    pub fn new() -> Self {
        QLearningAgentBuilder {
            config: AgentConfig::default(),
        }
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn discount_factor(mut self, discount_factor: f32) -> Self {
        self.config.discount_factor = discount_factor;
        self
    }

    pub fn initial_epsilon(mut self, epsilon: f32) -> Self {
        self.config.initial_epsilon = epsilon;
        self
    }

    pub fn final_epsilon(mut self, epsilon: f32) -> Self {
        self.config.final_epsilon = epsilon;
        self
    }

    pub fn epsilon_decay(mut self, decay: f32) -> Self {
        self.config.epsilon_decay = decay;
        self
    }

    /// Constant exploration rate: initial and final epsilon set to `epsilon`
    pub fn fixed_epsilon(mut self, epsilon: f32) -> Self {
        self.config.initial_epsilon = epsilon;
        self.config.final_epsilon = epsilon;
        self.config.epsilon_decay = 0.0;
        self
    }

    pub fn state_count(mut self, state_count: usize) -> Self {
        self.config.state_count = state_count;
        self
    }

    pub fn action_count(mut self, action_count: usize) -> Self {
        self.config.action_count = action_count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> Result<QLearningAgent> {
        QLearningAgent::new(self.config)
    }
}

impl Default for QLearningAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
