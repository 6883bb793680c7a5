use std::fmt;

/// Result type for frostlake operations
pub type Result<T> = std::result::Result<T, QLearningError>;

/// Main error type for the frostlake library
#[derive(Debug, Clone, PartialEq)]
pub enum QLearningError {
    /// Bad constructor or experiment parameter
    InvalidConfiguration {
        name: String,
        reason: String,
    },

    /// State index outside the value table
    InvalidState {
        state: usize,
        state_count: usize,
    },

    /// Action index outside the action space
    InvalidAction {
        action: usize,
        action_count: usize,
    },

    /// IO errors (file operations)
    Io(String),

    /// Serialization/deserialization errors
    Serialization(String),
}

impl fmt::Display for QLearningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QLearningError::InvalidConfiguration { name, reason } => {
                write!(f, "Invalid configuration '{}': {}", name, reason)
            }
            QLearningError::InvalidState { state, state_count } => {
                write!(f, "Invalid state {}: must be less than {}", state, state_count)
            }
            QLearningError::InvalidAction { action, action_count } => {
                write!(f, "Invalid action {}: must be less than {}", action, action_count)
            }
            QLearningError::Io(msg) => write!(f, "IO error: {}", msg),
            QLearningError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for QLearningError {}

// Conversion from std::io::Error
impl From<std::io::Error> for QLearningError {
    fn from(err: std::io::Error) -> Self {
        QLearningError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for QLearningError {
    fn from(err: serde_json::Error) -> Self {
        QLearningError::Serialization(err.to_string())
    }
}

impl QLearningError {
    pub fn invalid_configuration<S: Into<String>>(name: S, reason: S) -> Self {
        QLearningError::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_state(state: usize, state_count: usize) -> Self {
        QLearningError::InvalidState { state, state_count }
    }

    pub fn invalid_action(action: usize, action_count: usize) -> Self {
        QLearningError::InvalidAction { action, action_count }
    }
}
