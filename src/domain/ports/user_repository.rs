use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::User;
use crate::domain::ports::errors::DatabaseError;

/// Repository port for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Get a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// List all users
    async fn find_all(&self) -> Result<Vec<User>, DatabaseError>;

    /// Insert a new user
    async fn create(&self, user: &User) -> Result<(), DatabaseError>;

    /// Store a newly issued access token for the user
    async fn update_token(&self, id: Uuid, token: &str) -> Result<(), DatabaseError>;

    /// Store a newly issued refresh token for the user
    async fn update_refresh_token(&self, id: Uuid, refresh_token: &str)
        -> Result<(), DatabaseError>;
}
