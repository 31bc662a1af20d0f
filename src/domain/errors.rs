//! Domain errors for the Newswire backend core.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::ports::errors::DatabaseError;

/// Domain-level errors that can occur in the Newswire system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("News not found: {0}")]
    NewsNotFound(Uuid),

    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),

    #[error("User with email {0} already exists")]
    EmailAlreadyRegistered(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Auth error: {0}")]
    Auth(String),
}

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
