//! Ports (interfaces) to external collaborators.

pub mod auth;
pub mod errors;
pub mod metrics;
pub mod news_repository;
pub mod upload_repository;
pub mod user_repository;

pub use auth::{PasswordHasher, TokenIssuer};
pub use errors::DatabaseError;
pub use metrics::{MetricsSink, NullMetrics};
pub use news_repository::NewsRepository;
pub use upload_repository::UploadRepository;
pub use user_repository::UserRepository;
