//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notevault_core::types::UserId;
use notevault_entity::user::{Identity, Role};

/// Context for the current authenticated request.
///
/// Built by the authentication middleware, stored in the request's
/// extensions, and passed explicitly into service methods. It lives
/// exactly as long as the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Who is acting.
    pub identity: Identity,
    /// IP address of the request origin, when known.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        identity: Identity,
        ip_address: Option<String>,
        user_agent: Option<String>,
        request_time: DateTime<Utc>,
    ) -> Self {
        Self {
            identity,
            ip_address,
            user_agent,
            request_time,
        }
    }

    /// The acting account.
    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    /// The token subject.
    pub fn subject(&self) -> &str {
        &self.identity.subject
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.identity.has_role(Role::Admin)
    }
}
