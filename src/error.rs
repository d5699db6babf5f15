//! Error types for the decision-kit library.

use thiserror::Error;

/// Result type alias for decision-kit operations.
pub type Result<T> = std::result::Result<T, DecisionError>;

/// Errors that can occur while building problems or running simulations.
///
/// The value-iteration core never fails; errors are only raised while a
/// problem, bandit or simulation is being assembled or fed data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecisionError {
    /// A problem was built without any states or candidates.
    #[error("empty problem: {message}")]
    EmptyProblem { message: String },

    /// A reward or transition refers to a state that was never declared.
    #[error("unknown state: {state}")]
    UnknownState { state: String },

    /// A reward or transition refers to an action that was never declared.
    #[error("unknown action: {action}")]
    UnknownAction { action: String },

    /// The specified arm was not found in the bandit.
    #[error("arm not found: {arm}")]
    ArmNotFound { arm: String },

    /// The specified arm already exists in the bandit.
    #[error("arm already exists: {arm}")]
    ArmAlreadyExists { arm: String },

    /// No arms are available in the bandit.
    #[error("no arms available")]
    NoArmsAvailable,

    /// Mismatch in the dimensions of input data.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Invalid parameter value.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Builder configuration error.
    #[error("builder error: {message}")]
    BuilderError { message: String },
}

impl DecisionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DecisionError::InvalidParameter {
            message: message.into(),
        }
    }
}
