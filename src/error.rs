//! Error types for postboard.

use thiserror::Error;

use crate::auth::PermissionError;

/// Common error type for postboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The requesting user may not perform the operation.
    ///
    /// Displays the user-facing denial message unchanged.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique value is already taken.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        BoardError::Database(e.to_string())
    }
}

/// Result type alias for postboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
