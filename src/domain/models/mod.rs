//! Domain models.

pub mod config;
pub mod news;
pub mod upload;
pub mod user;

pub use config::{AuthConfig, CacheConfig, Config, DatabaseConfig, LoggingConfig, TimeoutConfig};
pub use news::News;
pub use upload::Upload;
pub use user::{AuthResponse, CreateUserRequest, User};
