//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notevault_core::types::NoteId;
use notevault_entity::share::ShareLink;

/// `{ success, message }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Message.
    pub message: String,
}

/// Login outcome. `token` is `null` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Message.
    pub message: String,
    /// Bearer token.
    pub token: Option<String>,
}

/// Public URL of a freshly issued share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareUrlResponse {
    /// `/share/<token>`.
    pub url: String,
}

/// Successful share resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveShareResponse {
    /// The note the link grants access to.
    pub resource_id: NoteId,
}

/// One of the caller's share links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    /// Token.
    pub token: String,
    /// Public URL.
    pub url: String,
    /// Shared note.
    pub resource_id: NoteId,
    /// Expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Uses left (`null` = unlimited).
    pub remaining_uses: Option<i32>,
    /// Revoked or depleted links are inactive.
    pub active: bool,
    /// Issue time.
    pub created_at: DateTime<Utc>,
}

impl ShareLinkResponse {
    /// Builds the response item for `link` published at `url`.
    pub fn new(link: ShareLink, url: String) -> Self {
        Self {
            token: link.token,
            url,
            resource_id: link.resource_id,
            expires_at: link.expires_at,
            remaining_uses: link.remaining_uses,
            active: link.active,
            created_at: link.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
