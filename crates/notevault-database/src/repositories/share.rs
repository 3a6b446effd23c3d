//! Share-link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use notevault_core::error::{AppError, ErrorKind};
use notevault_core::result::AppResult;
use notevault_core::types::{ShareLinkId, UserId};
use notevault_entity::share::{NewShareLink, ShareLink};

use crate::store::ShareLinkStore;

use super::map_write_error;

/// Repository for share links backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share-link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareLinkStore for ShareLinkRepository {
    async fn insert(&self, link: NewShareLink) -> AppResult<ShareLink> {
        sqlx::query_as::<_, ShareLink>(
            r#"INSERT INTO share_links
                (token, resource_id, owner_id, expires_at, remaining_uses, active, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            RETURNING *"#,
        )
        .bind(&link.token)
        .bind(link.resource_id)
        .bind(link.owner_id)
        .bind(link.expires_at)
        .bind(link.remaining_uses)
        .bind(link.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create share link", "Share token collision"))
    }

    async fn find_active_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE token = $1 AND active = TRUE",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find share link by token", e)
        })
    }

    async fn consume_use(
        &self,
        id: ShareLinkId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareLink>> {
        // Row lock taken by the UPDATE serializes concurrent consumers; the
        // loser re-evaluates the WHERE clause against the winner's row.
        sqlx::query_as::<_, ShareLink>(
            r#"UPDATE share_links
            SET remaining_uses = CASE
                    WHEN remaining_uses IS NULL THEN NULL
                    ELSE remaining_uses - 1
                END,
                active = CASE
                    WHEN remaining_uses IS NULL THEN TRUE
                    ELSE remaining_uses - 1 > 0
                END
            WHERE id = $1
              AND active = TRUE
              AND (remaining_uses IS NULL OR remaining_uses > 0)
              AND (expires_at IS NULL OR expires_at > $2)
            RETURNING *"#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume share link", e))
    }

    async fn deactivate(&self, token: &str, owner: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE share_links SET active = FALSE WHERE token = $1 AND owner_id = $2 AND active = TRUE",
        )
        .bind(token)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate share link", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))
    }
}
