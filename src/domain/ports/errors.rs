//! Errors surfaced by repository ports.

use thiserror::Error;
use uuid::Uuid;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("News not found: {0}")]
    NewsNotFound(Uuid),

    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}
