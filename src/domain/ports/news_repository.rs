use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::News;
use crate::domain::ports::errors::DatabaseError;

/// Repository port for news persistence operations
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a new article
    async fn create(&self, news: &News) -> Result<(), DatabaseError>;

    /// List all articles
    async fn find_all(&self) -> Result<Vec<News>, DatabaseError>;

    /// Get an article by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, DatabaseError>;

    /// Update an existing article
    async fn update(&self, news: &News) -> Result<(), DatabaseError>;

    /// Delete an article by ID
    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}
