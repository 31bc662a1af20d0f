//! Password hashing and token issuance adapters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AuthConfig;
use crate::domain::ports::{PasswordHasher, TokenIssuer};

/// Argon2id implementation of the `PasswordHasher` port.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DomainError::Auth(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// HS256 JWT implementation of the `TokenIssuer` port.
pub struct JwtTokenIssuer {
    secret: String,
    token_ttl: ChronoDuration,
}

impl JwtTokenIssuer {
    /// Create an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            token_ttl: ChronoDuration::hours(i64::try_from(config.token_ttl_hours).unwrap_or(24)),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: Uuid) -> DomainResult<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::Auth(format!("failed to sign token: {e}")))
    }

    fn authenticate(&self, token: &str) -> DomainResult<Uuid> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::Auth("invalid token".to_string()))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| DomainError::Auth("invalid subject claim".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hasher.verify("hunter22", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_verify_garbage_hash() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("hunter22", "not-a-phc-string"));
    }

    #[test]
    fn test_issue_and_authenticate_roundtrip() {
        let issuer = JwtTokenIssuer::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 1,
        });
        let user_id = Uuid::new_v4();
        let token = issuer.issue(user_id).unwrap();
        assert_eq!(issuer.authenticate(&token).unwrap(), user_id);
    }

    #[test]
    fn test_authenticate_rejects_wrong_secret() {
        let issuer = JwtTokenIssuer::new(&AuthConfig {
            jwt_secret: "secret-a".to_string(),
            token_ttl_hours: 1,
        });
        let other = JwtTokenIssuer::new(&AuthConfig {
            jwt_secret: "secret-b".to_string(),
            token_ttl_hours: 1,
        });
        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(other.authenticate(&token).is_err());
    }
}
