use serde::{Serialize, Deserialize};

/// Index of a discrete state (row of the value table)
pub type StateIndex = usize;

/// Index of a discrete action (column of the value table)
pub type ActionIndex = usize;

/// A single observed transition handed to the agent for a TD update.
///
/// Transitions are ephemeral: the orchestration layer builds one per
/// environment step and the agent never keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateIndex,
    pub action: ActionIndex,
    pub reward: f32,
    pub terminated: bool,
    pub next_state: StateIndex,
}

impl Transition {
    pub fn new(
        state: StateIndex,
        action: ActionIndex,
        reward: f32,
        terminated: bool,
        next_state: StateIndex,
    ) -> Self {
        Transition {
            state,
            action,
            reward,
            terminated,
            next_state,
        }
    }
}
