//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `password_hash`, `token` and `refresh_token` never serialize; they are
/// persisted but must not leak into caller-facing payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// City of residence.
    pub city: String,
    /// Unique email address, used as the login identifier.
    pub email: String,
    /// Argon2 hash of the user's password.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Last issued access token, if any.
    #[serde(skip_serializing, default)]
    pub token: Option<String>,
    /// Last issued refresh token, if any.
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    /// Authorization role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the account was activated.
    pub activated_at: Option<DateTime<Utc>>,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// When the email address was verified.
    pub verified_at: Option<DateTime<Utc>>,
    /// Soft-delete marker.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, verified user with a fresh id and timestamps.
    ///
    /// `password_hash` must already be hashed; models never see plaintext.
    pub fn new(
        name: impl Into<String>,
        age: i64,
        city: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            city: city.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            token: None,
            refresh_token: None,
            role: "user".to_string(),
            is_active: true,
            activated_at: Some(now),
            is_verified: true,
            verified_at: Some(now),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for registering a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Age in years; must be at least 18.
    pub age: i64,
    /// City of residence.
    pub city: String,
    /// Plaintext password; must be at least 6 characters.
    pub password: String,
    /// Email address; must be unique.
    pub email: String,
}

impl CreateUserRequest {
    /// Validate field constraints carried over from the API contract.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        if self.age < 18 {
            return Err("age must be at least 18".to_string());
        }
        if self.city.trim().is_empty() {
            return Err("city is required".to_string());
        }
        if self.password.len() < 6 {
            return Err("password must be at least 6 characters".to_string());
        }
        if !self.email.contains('@') {
            return Err("email is invalid".to_string());
        }
        Ok(())
    }
}

/// Response returned to a successfully authenticated caller.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Signed access token.
    pub token: String,
    /// Refresh token, empty until refresh flows are implemented.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}
