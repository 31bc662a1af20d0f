//! News domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published news article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct News {
    /// Unique article identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Short summary shown in listings.
    pub description: String,
    /// Full article body.
    pub content: String,
    /// Author name.
    pub author: String,
    /// Category label.
    pub category: String,
    /// Cover image path or URL.
    #[serde(default)]
    pub image: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl News {
    /// Create a new article with a fresh id and timestamps.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            content: content.into(),
            author: author.into(),
            category: category.into(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
