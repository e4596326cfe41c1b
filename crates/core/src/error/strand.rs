/// Unified error type for Strand
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrandError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Pipeline errors surfaced to callers outside the engine
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    // Generic error for compatibility
    #[error("{0}")]
    Other(String),
}

/// Result type alias using StrandError
pub type Result<T> = std::result::Result<T, StrandError>;

impl StrandError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a pipeline error
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<String> for StrandError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

impl From<&str> for StrandError {
    fn from(msg: &str) -> Self {
        Self::Other(msg.to_string())
    }
}

impl From<serde_json::Error> for StrandError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
