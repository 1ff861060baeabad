//! Error types for session operations.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Accessor called before `start()` (a programming error in the caller)
    #[error("session not started: call start() first")]
    NotStarted,

    /// Backend storage failure
    #[error("session backend error: {0}")]
    Backend(String),

    /// Filesystem failure from the file backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
