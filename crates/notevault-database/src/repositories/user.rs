//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use notevault_core::error::{AppError, ErrorKind};
use notevault_core::result::AppResult;
use notevault_entity::user::{CreateUser, User};

use crate::store::UserStore;

use super::map_write_error;

/// Repository for user accounts backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (email, password_hash, role, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *"#,
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user", "Email already registered"))
    }
}
