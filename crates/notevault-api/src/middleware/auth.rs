//! Authentication gate middleware.
//!
//! Runs once per request before routing reaches a handler. A rejected
//! bearer token ends the request with 401 whatever the route; an anonymous
//! caller only gets through to public routes.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use notevault_auth::gate::GateOutcome;
use notevault_core::config::Access;
use notevault_service::context::RequestContext;

use crate::error::unauthorized;
use crate::state::AppState;

/// Resolves the caller and stores a [`RequestContext`] in the request
/// extensions for the extractors.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let outcome = state.gate.authenticate(header.as_deref()).await;
    let access = state
        .policy
        .access_for(request.method(), request.uri().path());

    match outcome {
        GateOutcome::Rejected(reason) => {
            debug!(
                %reason,
                method = %request.method(),
                path = %request.uri().path(),
                "Request rejected by authentication gate"
            );
            return unauthorized();
        }
        GateOutcome::Anonymous if access == Access::Authenticated => {
            debug!(
                method = %request.method(),
                path = %request.uri().path(),
                "Anonymous request to protected route"
            );
            return unauthorized();
        }
        GateOutcome::Anonymous => {}
        GateOutcome::Authenticated(identity) => {
            let headers = request.headers();
            let ip_address = headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string());
            let user_agent = headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let ctx = RequestContext::new(identity, ip_address, user_agent, state.clock.now());
            request.extensions_mut().insert(ctx);
        }
    }

    next.run(request).await
}
