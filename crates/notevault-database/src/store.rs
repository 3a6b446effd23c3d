//! Persistence contracts.
//!
//! The share-link lifecycle and the authentication gate only talk to these
//! traits, so the same service code runs against PostgreSQL in production
//! and against the in-memory maps in tests and single-process deployments.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use notevault_core::result::AppResult;
use notevault_core::types::{ShareLinkId, UserId};
use notevault_entity::share::{NewShareLink, ShareLink};
use notevault_entity::user::{CreateUser, User};

/// Storage for share links.
#[async_trait]
pub trait ShareLinkStore: Send + Sync + Debug + 'static {
    /// Persists a freshly issued link. Fails with `Conflict` on a token collision.
    async fn insert(&self, link: NewShareLink) -> AppResult<ShareLink>;

    /// Returns the active link carrying `token`, if any.
    ///
    /// Expiry and use budget are not checked here.
    async fn find_active_by_token(&self, token: &str) -> AppResult<Option<ShareLink>>;

    /// Spends one use of the link, atomically with respect to every other
    /// caller of this method for the same link.
    ///
    /// The decrement only happens while the link is still active, unexpired
    /// at `now`, and has a positive budget (or no budget at all). When the
    /// budget reaches zero the link is deactivated in the same step. Returns
    /// the post-update row, or `None` when any condition no longer holds.
    async fn consume_use(&self, id: ShareLinkId, now: DateTime<Utc>)
    -> AppResult<Option<ShareLink>>;

    /// Deactivates the link carrying `token` if it belongs to `owner`.
    ///
    /// Returns `false` when no such active link exists.
    async fn deactivate(&self, token: &str, owner: UserId) -> AppResult<bool>;

    /// All links issued by `owner`, newest first.
    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<ShareLink>>;
}

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Case-insensitive lookup by email, which is also the token subject.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Creates a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;
}
