//! User service: authentication, lookup and detail aggregation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthResponse, CreateUserRequest, TimeoutConfig, User};
use crate::domain::ports::{MetricsSink, PasswordHasher, TokenIssuer, UserRepository};
use crate::infrastructure::cache::TtlCache;
use crate::services::aggregator::{
    AggregationOutcome, BatchContext, DetailAggregator, DetailField, Enrichable,
};

impl Enrichable for User {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

/// Detail fields for the enriched user view.
///
/// These are placeholder fetchers returning constant values; deployments
/// inject real login-history lookups via [`UserService::with_detail_fields`]
/// without altering the aggregation contract.
pub fn default_user_detail_fields(timeout: Duration) -> Vec<DetailField<User>> {
    vec![
        DetailField::new("last_login_at", timeout, |_user: User| async {
            Ok(Value::String(Utc::now().to_rfc3339()))
        }),
        DetailField::new("login_count", timeout, |_user: User| async {
            Ok(Value::from(0))
        }),
        DetailField::new("active_sessions", timeout, |_user: User| async {
            Ok(Value::from(0))
        }),
    ]
}

/// Coordinates user lookups through the cache, the repository and the
/// detail aggregator.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    cache: Arc<TtlCache<User>>,
    metrics: Arc<dyn MetricsSink>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    aggregator: DetailAggregator<User>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a service with the default (placeholder) detail fields.
    pub fn new(
        repo: Arc<R>,
        cache: Arc<TtlCache<User>>,
        metrics: Arc<dyn MetricsSink>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        timeouts: &TimeoutConfig,
    ) -> Self {
        Self {
            repo,
            cache,
            metrics,
            hasher,
            tokens,
            aggregator: DetailAggregator::new(default_user_detail_fields(
                timeouts.user_details(),
            )),
        }
    }

    /// Replace the detail field set.
    pub fn with_detail_fields(mut self, fields: Vec<DetailField<User>>) -> Self {
        self.aggregator = DetailAggregator::new(fields);
        self
    }

    fn email_key(email: &str) -> String {
        format!("user:email:{email}")
    }

    fn id_key(id: Uuid) -> String {
        format!("user:id:{id}")
    }

    /// Authenticate by email and password, issuing a fresh access token.
    ///
    /// Lookup failures and password mismatches are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let cache_key = Self::email_key(email);
        let user = match self.cache.get(&cache_key).await {
            Some(user) => {
                self.metrics.record_cache_hit();
                user
            }
            None => {
                self.metrics.record_cache_miss();
                let user = self
                    .repo
                    .find_by_email(email)
                    .await?
                    .ok_or(DomainError::InvalidCredentials)?;
                self.cache.set(cache_key, user.clone()).await;
                user
            }
        };

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        self.repo.update_token(user.id, &token).await?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthResponse {
            token,
            refresh_token: String::new(),
            user,
        })
    }

    /// Fetch one user, consulting the cache before the repository.
    pub async fn get_user_by_id(&self, id: Uuid) -> DomainResult<User> {
        let cache_key = Self::id_key(id);
        if let Some(user) = self.cache.get(&cache_key).await {
            self.metrics.record_cache_hit();
            return Ok(user);
        }
        self.metrics.record_cache_miss();

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))?;
        self.cache.set(cache_key, user.clone()).await;
        Ok(user)
    }

    /// List all users without enrichment.
    pub async fn get_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.repo.find_all().await?)
    }

    /// Register a new user.
    pub async fn create_user(&self, req: CreateUserRequest) -> DomainResult<User> {
        req.validate().map_err(DomainError::ValidationFailed)?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::EmailAlreadyRegistered(req.email));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = User::new(req.name, req.age, req.city, req.email, password_hash);
        self.repo.create(&user).await?;

        self.cache
            .set(Self::email_key(&user.email), user.clone())
            .await;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// List all users enriched with their detail fields.
    ///
    /// A repository failure aborts before any per-entity work; per-entity
    /// failures are collected in the outcome instead.
    pub async fn get_all_with_details(
        &self,
        ctx: &BatchContext,
    ) -> DomainResult<AggregationOutcome<User>> {
        let users = self.repo.find_all().await?;
        Ok(self.aggregator.aggregate(users, ctx).await)
    }

    /// Current cache entry count, reported to the metrics sink as a gauge.
    pub async fn report_cache_size(&self) -> usize {
        let size = self.cache.len().await;
        self.metrics.record_cache_size(size);
        size
    }
}
