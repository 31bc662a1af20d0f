//! `SQLite` persistence adapters.

pub mod connection;
pub mod news_repo;
pub mod upload_repo;
pub mod user_repo;
pub mod utils;

pub use connection::DatabaseConnection;
pub use news_repo::NewsRepositoryImpl;
pub use upload_repo::UploadRepositoryImpl;
pub use user_repo::UserRepositoryImpl;
