//! Newswire - user and news backend core
//!
//! Newswire is the in-process core of a content backend: repositories for
//! users, news and uploads, a process-wide TTL cache with background
//! eviction, and a concurrent detail aggregator that enriches base entities
//! with independently fetched detail fields under per-field timeouts.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): Business logic coordination
//! - **Infrastructure Layer** (`infrastructure`): External integrations and adapters
//!
//! # Example
//!
//! ```ignore
//! use newswire::infrastructure::cache::TtlCache;
//! use newswire::services::UserService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire the cache, repositories and services at the composition root
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    CacheConfig, Config, DatabaseConfig, LoggingConfig, News, TimeoutConfig, Upload, User,
};
pub use domain::ports::{
    MetricsSink, NewsRepository, NullMetrics, PasswordHasher, TokenIssuer, UploadRepository,
    UserRepository,
};
pub use infrastructure::cache::TtlCache;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::aggregator::{
    AggregationOutcome, BatchContext, DetailAggregator, DetailError, DetailField, Enrichable,
    Enriched,
};
pub use services::{NewsService, UserService};
