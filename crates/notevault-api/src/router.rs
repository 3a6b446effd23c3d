//! Route definitions for the NoteVault HTTP API.
//!
//! Every route sits behind the authentication middleware, which decides
//! from [`AccessPolicy`](notevault_auth::gate::AccessPolicy) whether an
//! anonymous caller may proceed.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the authentication gate.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(share_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ))
        .with_state(state)
}

/// Account endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
}

/// Share-link issuance, resolution, revocation, and the browser redirect
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/share/{id}",
            post(handlers::share::create_share)
                .get(handlers::share::resolve_share)
                .delete(handlers::share::revoke_share),
        )
        .route("/api/shares", get(handlers::share::list_shares))
        .route("/share/{token}", get(handlers::share::redirect_share))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(handlers::health::health))
}
