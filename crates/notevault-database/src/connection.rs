//! PostgreSQL pool for the `postgres` persistence backend.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use notevault_core::config::DatabaseConfig;
use notevault_core::error::{AppError, ErrorKind};

use crate::migration;

/// Shared sqlx pool behind the PostgreSQL stores.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens a pool from configuration.
    ///
    /// An unparsable `database.url` is a configuration error; an unreachable
    /// server is a database error.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let target = PgConnectOptions::from_str(&config.url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid database.url {}", mask_password(&config.url)),
                e,
            )
        })?;

        info!(url = %mask_password(&config.url), "Connecting to PostgreSQL");
        let pool = pool_options(config)
            .connect_with(target)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Database unreachable: {e}"), e)
            })?;

        Ok(Self { pool })
    }

    /// Opens a pool and applies pending migrations when `run_migrations` is set.
    pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<Self, AppError> {
        let db = Self::connect(config).await?;
        if config.run_migrations {
            migration::run_migrations(db.pool()).await?;
        }
        Ok(db)
    }

    /// The underlying sqlx pool, shared by the repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for checked-out connections and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Replaces the password of a connection URL with `****` for logs.
pub fn mask_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
