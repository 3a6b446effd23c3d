//! Application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use notevault_core::config::{AppConfig, PersistenceBackend};
use notevault_core::error::AppError;
use notevault_core::traits::{Clock, SystemClock};
use notevault_database::store::{ShareLinkStore, UserStore};
use notevault_database::{
    DatabasePool, MemoryShareLinkStore, MemoryUserStore, ShareLinkRepository, UserRepository,
};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
}

/// Stores selected by `database.backend`, plus the pool to close on shutdown.
pub struct Stores {
    /// Share-link persistence.
    pub share_links: Arc<dyn ShareLinkStore>,
    /// Account persistence.
    pub users: Arc<dyn UserStore>,
    /// Open pool for the PostgreSQL backend.
    pub pool: Option<DatabasePool>,
}

/// Opens the configured persistence backend.
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.database.backend {
        PersistenceBackend::Memory => {
            warn!("Using in-memory persistence; data is lost on restart");
            Ok(Stores {
                share_links: Arc::new(MemoryShareLinkStore::new()),
                users: Arc::new(MemoryUserStore::new()),
                pool: None,
            })
        }
        PersistenceBackend::Postgres => {
            let db = DatabasePool::connect_and_migrate(&config.database).await?;
            Ok(Stores {
                share_links: Arc::new(ShareLinkRepository::new(db.pool().clone())),
                users: Arc::new(UserRepository::new(db.pool().clone())),
                pool: Some(db),
            })
        }
    }
}

/// Runs the NoteVault server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting NoteVault v{}", env!("CARGO_PKG_VERSION"));

    let stores = open_stores(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, stores.share_links, stores.users, clock)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "NoteVault server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(true);
            })
            .await
    };
    // In-flight requests get `shutdown_grace_seconds` after the signal.
    let deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.map_err(|e| AppError::internal(format!("Server error: {e}")))?,
        _ = deadline => warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out"),
    }

    if let Some(db) = stores.pool {
        db.close().await;
    }
    info!("NoteVault server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
