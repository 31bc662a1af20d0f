//! `SQLite` implementation of `UploadRepository`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::utils::parse_datetime;
use crate::domain::models::Upload;
use crate::domain::ports::errors::DatabaseError;
use crate::domain::ports::UploadRepository;

/// `SQLite` implementation of `UploadRepository`
pub struct UploadRepositoryImpl {
    pool: SqlitePool,
}

impl UploadRepositoryImpl {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_upload_row(row: &SqliteRow) -> Result<Upload, DatabaseError> {
    Ok(Upload {
        id: Uuid::parse_str(&row.try_get::<String, _>("id")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
        kind: row.try_get("kind")?,
        path: row.try_get("path")?,
        created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[async_trait]
impl UploadRepository for UploadRepositoryImpl {
    async fn create(&self, upload: &Upload) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO uploads (id, title, description, content, kind, path,
                                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(upload.id.to_string())
        .bind(&upload.title)
        .bind(&upload.description)
        .bind(&upload.content)
        .bind(&upload.kind)
        .bind(&upload.path)
        .bind(upload.created_at.to_rfc3339())
        .bind(upload.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Upload>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, title, description, content, kind, path, created_at, updated_at \
             FROM uploads ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_upload_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, title, description, content, kind, path, created_at, updated_at \
             FROM uploads WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_upload_row).transpose()
    }

    async fn update(&self, upload: &Upload) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r"
            UPDATE uploads
            SET title = ?, description = ?, content = ?, kind = ?, path = ?, updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&upload.title)
        .bind(&upload.description)
        .bind(&upload.content)
        .bind(&upload.kind)
        .bind(&upload.path)
        .bind(Utc::now().to_rfc3339())
        .bind(upload.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::UploadNotFound(upload.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM uploads WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
