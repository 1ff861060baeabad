//! Error types for authentication operations.

use gantry_session::SessionError;
use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication-specific errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Underlying session failure
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Identity payload could not be represented as session data
    #[error("Serialization error: {0}")]
    Serialization(String),
}
