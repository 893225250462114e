//! Error types for the catalogue core

use thiserror::Error;

/// Main application error type
///
/// Every public operation in the core recovers its failures into one of
/// these variants; nothing crosses the service boundary as a panic.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Hashing unavailable: {0}")]
    Hashing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a storage error to `Conflict` when it is a unique-constraint
    /// violation, keeping it a `Database` error otherwise.
    ///
    /// A check-then-write is not atomic, so uniqueness violations must be
    /// handled as a possible outcome of the write itself, not only of the
    /// defensive pre-check.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
