//! Unified application error types for NoteVault.
//!
//! The security boundary has three small, typed error families
//! ([`TokenError`], [`ShareLinkError`], [`ConfigError`]). They are precise
//! internally so that logs can tell the cases apart, and every one of them
//! converts into [`AppError`], whose message is what a caller actually sees.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found (or is deliberately hidden).
    NotFound,
    /// The request carried no usable credentials.
    Unauthorized,
    /// The caller is authenticated but may not perform the action.
    Forbidden,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout NoteVault.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

/// Reasons a bearer token fails verification.
///
/// All three collapse to the same "unauthorized" outcome for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token could not be parsed as a signed structured token.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not match the header and claims.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is past its `exp` instant.
    #[error("token has expired")]
    Expired,
}

/// Share-link resolution failure.
///
/// A single variant on purpose: unknown, expired, depleted, and revoked
/// links are indistinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShareLinkError {
    /// The link does not exist or is no longer usable.
    #[error("share link is invalid or expired")]
    NotFoundOrExpired,
}

/// Fatal configuration problems detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The signing secret is shorter than 256 bits.
    #[error("signing secret is too weak: {actual_bits} bits, at least 256 required")]
    WeakSecret {
        /// Size of the rejected secret in bits.
        actual_bits: usize,
    },
    /// Any other invalid setting.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        Self::with_source(ErrorKind::Unauthorized, "Unauthorized", err)
    }
}

impl From<ShareLinkError> for AppError {
    fn from(err: ShareLinkError) -> Self {
        Self::with_source(ErrorKind::NotFound, "invalid_or_expired", err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_share_one_public_message() {
        let messages: Vec<String> = [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ]
        .into_iter()
        .map(|e| AppError::from(e).message)
        .collect();

        assert!(messages.iter().all(|m| m == "Unauthorized"));
    }

    #[test]
    fn test_share_link_error_maps_to_not_found() {
        let err = AppError::from(ShareLinkError::NotFoundOrExpired);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "invalid_or_expired");
    }

    #[test]
    fn test_weak_secret_message() {
        let err = ConfigError::WeakSecret { actual_bits: 128 };
        assert!(err.to_string().contains("128 bits"));
        assert_eq!(AppError::from(err).kind, ErrorKind::Configuration);
    }
}
