use crate::env::ActionSpace;
use crate::error::Result;
use crate::types::{ActionIndex, StateIndex, Transition};

/// Trait for tabular agents driven by the episode loop.
///
/// The call order within an episode is `select_action`, environment step,
/// `update`; `decay_exploration` runs once the episode is over.
pub trait TabularAgent {
    /// Pick an action for `state`, possibly sampling from `action_space`
    fn select_action<S: ActionSpace + ?Sized>(
        &mut self,
        state: StateIndex,
        action_space: &mut S,
    ) -> Result<ActionIndex>;

    /// Learn from a single transition, returning the TD error
    fn learn(&mut self, transition: &Transition) -> Result<f32>;

    /// End-of-episode exploration schedule step
    fn decay_exploration(&mut self);

    /// Forget everything learned so far
    fn reset(&mut self);

    /// Get the current exploration rate (if applicable)
    fn exploration_rate(&self) -> Option<f32> {
        None
    }
}
