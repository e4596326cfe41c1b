/// Errors raised by individual transforms while processing text
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("{0}")]
    Failed(String),
}

impl TransformError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid option error
    pub fn invalid_option(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Create a generic failure
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// Result type alias for transform runs
pub type TransformResult<T> = Result<T, TransformError>;
