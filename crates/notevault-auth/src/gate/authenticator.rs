//! Bearer extraction and identity resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use notevault_core::error::TokenError;
use notevault_entity::share::token_hint;
use notevault_entity::user::Identity;

use crate::jwt::TokenCodec;

use super::lookup::IdentityLookup;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of running the gate on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// No bearer credential was presented.
    Anonymous,
    /// The token verified and its subject resolved.
    Authenticated(Identity),
    /// A credential was presented and must not be honoured.
    Rejected(RejectReason),
}

/// Why a presented credential was refused.
///
/// Only ever logged; every variant yields the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Token verification failed.
    Token(TokenError),
    /// The token is valid but names no known account.
    UnknownSubject,
    /// The identity lookup itself failed.
    LookupFailed,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(TokenError::Malformed) => write!(f, "malformed_token"),
            Self::Token(TokenError::InvalidSignature) => write!(f, "invalid_signature"),
            Self::Token(TokenError::Expired) => write!(f, "expired_token"),
            Self::UnknownSubject => write!(f, "unknown_subject"),
            Self::LookupFailed => write!(f, "lookup_failed"),
        }
    }
}

/// Returns the credential of a `Bearer` authorization value.
///
/// Any other scheme (or no header) yields `None`.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix(BEARER_PREFIX).map(str::trim)
}

/// Verifies bearer tokens and resolves their subject.
#[derive(Debug, Clone)]
pub struct AuthenticationGate {
    codec: Arc<TokenCodec>,
    lookup: Arc<dyn IdentityLookup>,
}

impl AuthenticationGate {
    /// Creates a gate over a codec and an identity lookup.
    pub fn new(codec: Arc<TokenCodec>, lookup: Arc<dyn IdentityLookup>) -> Self {
        Self { codec, lookup }
    }

    /// The codec used to verify tokens.
    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Classifies a request by its `Authorization` header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> GateOutcome {
        let Some(token) = bearer_token(authorization) else {
            return GateOutcome::Anonymous;
        };

        let subject = match self.codec.verify(token) {
            Ok(subject) => subject,
            Err(e) => {
                debug!(reason = %RejectReason::Token(e), token = token_hint(token), "Bearer token rejected");
                return GateOutcome::Rejected(RejectReason::Token(e));
            }
        };

        match self.lookup.lookup(&subject).await {
            Ok(Some(identity)) => GateOutcome::Authenticated(identity),
            Ok(None) => {
                warn!(subject = %subject, "Valid token for unknown subject");
                GateOutcome::Rejected(RejectReason::UnknownSubject)
            }
            Err(e) => {
                warn!(subject = %subject, error = %e, "Identity lookup failed");
                GateOutcome::Rejected(RejectReason::LookupFailed)
            }
        }
    }
}
