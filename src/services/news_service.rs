//! News service: article CRUD and detail aggregation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{News, TimeoutConfig};
use crate::domain::ports::NewsRepository;
use crate::services::aggregator::{
    AggregationOutcome, BatchContext, DetailAggregator, DetailField, Enrichable,
};

impl Enrichable for News {
    fn entity_id(&self) -> Uuid {
        self.id
    }
}

/// Detail fields for the enriched news view.
///
/// `comments_count` and `likes_count` are placeholder fetchers until the
/// engagement backends exist; `last_updated` reads the article's own
/// timestamp.
pub fn default_news_detail_fields(timeout: Duration) -> Vec<DetailField<News>> {
    vec![
        DetailField::new("comments_count", timeout, |_news: News| async {
            Ok(Value::from(0))
        }),
        DetailField::new("likes_count", timeout, |_news: News| async {
            Ok(Value::from(0))
        }),
        DetailField::new("last_updated", timeout, |news: News| async move {
            Ok(Value::String(news.updated_at.to_rfc3339()))
        }),
    ]
}

/// Coordinates article persistence and enrichment.
pub struct NewsService<R: NewsRepository> {
    repo: Arc<R>,
    aggregator: DetailAggregator<News>,
}

impl<R: NewsRepository> NewsService<R> {
    /// Create a service with the default detail fields.
    pub fn new(repo: Arc<R>, timeouts: &TimeoutConfig) -> Self {
        Self {
            repo,
            aggregator: DetailAggregator::new(default_news_detail_fields(
                timeouts.news_details(),
            )),
        }
    }

    /// Replace the detail field set.
    pub fn with_detail_fields(mut self, fields: Vec<DetailField<News>>) -> Self {
        self.aggregator = DetailAggregator::new(fields);
        self
    }

    /// Persist a new article.
    pub async fn create_news(&self, news: &News) -> DomainResult<()> {
        self.repo.create(news).await?;
        tracing::info!(news_id = %news.id, "news created");
        Ok(())
    }

    /// Fetch one article by id.
    pub async fn get_news_by_id(&self, id: Uuid) -> DomainResult<News> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NewsNotFound(id))
    }

    /// List all articles without enrichment.
    pub async fn get_all_news(&self) -> DomainResult<Vec<News>> {
        Ok(self.repo.find_all().await?)
    }

    /// Update an existing article.
    pub async fn update_news(&self, news: &News) -> DomainResult<()> {
        Ok(self.repo.update(news).await?)
    }

    /// Delete an article by id.
    pub async fn delete_news(&self, id: Uuid) -> DomainResult<()> {
        Ok(self.repo.delete(id).await?)
    }

    /// List all articles enriched with their detail fields.
    pub async fn get_all_news_with_details(
        &self,
        ctx: &BatchContext,
    ) -> DomainResult<AggregationOutcome<News>> {
        let articles = self.repo.find_all().await?;
        Ok(self.aggregator.aggregate(articles, ctx).await)
    }
}
