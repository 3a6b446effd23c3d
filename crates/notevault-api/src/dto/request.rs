//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use notevault_service::ShareOptions;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Account email, also the token subject.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query string of `POST /api/share/{noteId}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CreateShareQuery {
    /// Lifetime in minutes; the configured default when absent.
    pub ttl_minutes: Option<u64>,
    /// Use budget; the configured default when absent.
    pub max_uses: Option<u32>,
}

impl From<CreateShareQuery> for ShareOptions {
    fn from(query: CreateShareQuery) -> Self {
        Self {
            ttl_minutes: query.ttl_minutes,
            max_uses: query.max_uses,
        }
    }
}
