//! Authentication ports.
//!
//! Password hashing and token issuance are external collaborators of the
//! core; the service layer only depends on these interfaces.

use uuid::Uuid;

use crate::domain::errors::DomainResult;

/// Hashes and verifies user passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Issues and validates access tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token for the given user.
    fn issue(&self, user_id: Uuid) -> DomainResult<String>;

    /// Validate a token and return the user id it was issued for.
    fn authenticate(&self, token: &str) -> DomainResult<Uuid>;
}
