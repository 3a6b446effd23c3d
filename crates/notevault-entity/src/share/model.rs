//! Share-link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notevault_core::types::{NoteId, ShareLinkId, UserId};

/// A capability token granting anonymous access to one note.
///
/// `active` is necessary but not sufficient for the link to be usable;
/// see [`ShareLink::is_usable_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// Surrogate key.
    pub id: ShareLinkId,
    /// Opaque URL-safe token (unique).
    pub token: String,
    /// The note this link grants access to.
    pub resource_id: NoteId,
    /// Account that issued the link.
    pub owner_id: UserId,
    /// Absolute expiry; `None` never expires by time.
    pub expires_at: Option<DateTime<Utc>>,
    /// Remaining use budget; `None` is unlimited. Only ever decreases.
    pub remaining_uses: Option<i32>,
    /// Cleared on revocation and when the use budget reaches zero.
    pub active: bool,
    /// Issuance instant.
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    /// Returns whether the time bound has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// Returns whether a use budget exists and is spent.
    pub fn is_depleted(&self) -> bool {
        self.remaining_uses.is_some_and(|n| n <= 0)
    }

    /// A link is usable iff it is active, unexpired, and not depleted.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired_at(now) && !self.is_depleted()
    }

    /// Short token prefix that is safe to put in logs.
    pub fn token_hint(&self) -> &str {
        token_hint(&self.token)
    }
}

/// Returns at most the first eight characters of a token.
pub fn token_hint(token: &str) -> &str {
    match token.char_indices().nth(8) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

/// Data required to persist a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareLink {
    /// Freshly generated token.
    pub token: String,
    /// Shared note.
    pub resource_id: NoteId,
    /// Issuing account.
    pub owner_id: UserId,
    /// Absolute expiry (if any).
    pub expires_at: Option<DateTime<Utc>>,
    /// Initial use budget (if any).
    pub remaining_uses: Option<i32>,
    /// Issuance instant.
    pub created_at: DateTime<Utc>,
}
