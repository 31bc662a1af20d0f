use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Upload;
use crate::domain::ports::errors::DatabaseError;

/// Repository port for upload record persistence
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Insert a new upload record
    async fn create(&self, upload: &Upload) -> Result<(), DatabaseError>;

    /// List all upload records
    async fn find_all(&self) -> Result<Vec<Upload>, DatabaseError>;

    /// Get an upload record by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, DatabaseError>;

    /// Update an existing upload record
    async fn update(&self, upload: &Upload) -> Result<(), DatabaseError>;

    /// Delete an upload record by ID
    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError>;
}
