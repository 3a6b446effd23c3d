//! Register, login, and me handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::Validate;

use notevault_core::error::ErrorKind;
use notevault_entity::user::Identity;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()?;
    state.auth_service.register(&req.email, &req.password).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "User registered successfully".to_string(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    req.validate()?;

    match state.auth_service.login(&req.email, &req.password).await {
        Ok(issued) => Ok(Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            token: Some(issued.token),
        })
        .into_response()),
        Err(e) if e.kind == ErrorKind::Unauthorized => Ok((
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: e.message,
                token: None,
            }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<Identity> {
    Json(auth.0.identity)
}
