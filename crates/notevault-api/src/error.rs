//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use notevault_core::error::{AppError, ErrorKind, ShareLinkError};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Handler error: an [`AppError`] rendered as JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self(AppError::validation(err.to_string()))
    }
}

impl ApiError {
    fn is_share_link_failure(&self) -> bool {
        self.0
            .source
            .as_deref()
            .is_some_and(|s| s.downcast_ref::<ShareLinkError>().is_some())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_share_link_failure() {
            return invalid_or_expired();
        }

        let err = self.0;
        let (status, error_code) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse {
                        error: "INTERNAL_ERROR".to_string(),
                        message: Some("Internal server error".to_string()),
                    }),
                )
                    .into_response();
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: Some(err.message),
        };

        (status, Json(body)).into_response()
    }
}

/// 404 `{"error":"invalid_or_expired"}`, the only failure share resolution reveals.
pub fn invalid_or_expired() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            error: "invalid_or_expired".to_string(),
            message: None,
        }),
    )
        .into_response()
}

/// 401 with the generic body used for every authentication failure.
pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: Some("Unauthorized".to_string()),
        }),
    )
        .into_response()
}
