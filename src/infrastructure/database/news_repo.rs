//! `SQLite` implementation of `NewsRepository`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::utils::parse_datetime;
use crate::domain::models::News;
use crate::domain::ports::errors::DatabaseError;
use crate::domain::ports::NewsRepository;

/// `SQLite` implementation of `NewsRepository`
pub struct NewsRepositoryImpl {
    pool: SqlitePool,
}

impl NewsRepositoryImpl {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_news_row(row: &SqliteRow) -> Result<News, DatabaseError> {
    Ok(News {
        id: Uuid::parse_str(&row.try_get::<String, _>("id")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
        author: row.try_get("author")?,
        category: row.try_get("category")?,
        image: row.try_get("image")?,
        created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[async_trait]
impl NewsRepository for NewsRepositoryImpl {
    async fn create(&self, news: &News) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            INSERT INTO news (id, title, description, content, author, category, image,
                              created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(news.id.to_string())
        .bind(&news.title)
        .bind(&news.description)
        .bind(&news.content)
        .bind(&news.author)
        .bind(&news.category)
        .bind(&news.image)
        .bind(news.created_at.to_rfc3339())
        .bind(news.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<News>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, title, description, content, author, category, image, created_at, updated_at \
             FROM news ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_news_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, title, description, content, author, category, image, created_at, updated_at \
             FROM news WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_news_row).transpose()
    }

    async fn update(&self, news: &News) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r"
            UPDATE news
            SET title = ?, description = ?, content = ?, author = ?, category = ?, image = ?,
                updated_at = ?
            WHERE id = ?
            ",
        )
        .bind(&news.title)
        .bind(&news.description)
        .bind(&news.content)
        .bind(&news.author)
        .bind(&news.category)
        .bind(&news.image)
        .bind(Utc::now().to_rfc3339())
        .bind(news.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NewsNotFound(news.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
