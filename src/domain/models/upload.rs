//! Upload domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored upload record (the file itself lives on disk at `path`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Upload {
    /// Unique upload identifier.
    pub id: Uuid,
    /// Human-readable title.
    pub title: String,
    /// Description of the upload.
    pub description: String,
    /// Inline content or extracted text, if any.
    pub content: String,
    /// Media kind, e.g. "image" or "document".
    pub kind: String,
    /// Storage path of the uploaded file.
    pub path: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Upload {
    /// Create a new upload record with a fresh id and timestamps.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        kind: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            content: String::new(),
            kind: kind.into(),
            path: path.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
