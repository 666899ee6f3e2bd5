//! Error types for qbot

use thiserror::Error;

/// Main error type for qbot
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QbotError {
    #[error("Invalid input: expected {expected} values, got {actual}")]
    InvalidInput { expected: usize, actual: usize },

    #[error("Invalid index: {index} is outside 0..{size}")]
    InvalidIndex { index: usize, size: usize },

    #[error("Q-network parameters are not initialized")]
    NotReady,

    #[error("Training step produced non-finite parameters")]
    Diverged,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QbotError {
    /// Shorthand for a dimension mismatch
    pub fn dimension(expected: usize, actual: usize) -> Self {
        QbotError::InvalidInput { expected, actual }
    }
}

/// Result type alias for qbot operations
pub type Result<T> = std::result::Result<T, QbotError>;
