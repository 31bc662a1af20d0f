//! `SQLite` implementation of `UserRepository`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::utils::{parse_datetime, parse_optional_datetime};
use crate::domain::models::User;
use crate::domain::ports::errors::DatabaseError;
use crate::domain::ports::UserRepository;

const SELECT_COLUMNS: &str = "id, name, age, city, email, password_hash, token, refresh_token, \
     role, is_active, activated_at, is_verified, verified_at, is_deleted, created_at, updated_at";

/// `SQLite` implementation of `UserRepository`
pub struct UserRepositoryImpl {
    pool: SqlitePool,
}

impl UserRepositoryImpl {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_user_row(row: &SqliteRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: Uuid::parse_str(&row.try_get::<String, _>("id")?)?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        city: row.try_get("city")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        token: row.try_get("token")?,
        refresh_token: row.try_get("refresh_token")?,
        role: row.try_get("role")?,
        is_active: row.try_get("is_active")?,
        activated_at: parse_optional_datetime(row.try_get("activated_at")?)?,
        is_verified: row.try_get("is_verified")?,
        verified_at: parse_optional_datetime(row.try_get("verified_at")?)?,
        is_deleted: row.try_get("is_deleted")?,
        created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
    })
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM users ORDER BY created_at ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(map_user_row).collect()
    }

    async fn create(&self, user: &User) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, name, age, city, email, password_hash, token, refresh_token,
                               role, is_active, activated_at, is_verified, verified_at,
                               is_deleted, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.city)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.token)
        .bind(&user.refresh_token)
        .bind(&user.role)
        .bind(user.is_active)
        .bind(user.activated_at.map(|dt| dt.to_rfc3339()))
        .bind(user.is_verified)
        .bind(user.verified_at.map(|dt| dt.to_rfc3339()))
        .bind(user.is_deleted)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DatabaseError::ConstraintViolation(format!(
                    "user with email {} already exists",
                    user.email
                )),
            ),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_token(&self, id: Uuid, token: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now().to_rfc3339())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::UserNotFound(id));
        }
        Ok(())
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        refresh_token: &str,
    ) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("UPDATE users SET refresh_token = ?, updated_at = ? WHERE id = ?")
                .bind(refresh_token)
                .bind(Utc::now().to_rfc3339())
                .bind(id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::UserNotFound(id));
        }
        Ok(())
    }
}
