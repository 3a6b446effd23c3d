//! Share-link issuance, resolution, and revocation.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use notevault_core::config::{ConsumePolicy, ShareConfig};
use notevault_core::error::{AppError, ShareLinkError};
use notevault_core::result::AppResult;
use notevault_core::traits::Clock;
use notevault_core::types::{NoteId, UserId};
use notevault_database::store::ShareLinkStore;
use notevault_entity::share::{NewShareLink, ShareLink, token_hint};

use super::link::LinkService;
use crate::context::RequestContext;

/// Creator-supplied limits for a new link. `None` falls back to configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShareOptions {
    /// Lifetime in minutes.
    pub ttl_minutes: Option<u64>,
    /// Use budget.
    pub max_uses: Option<u32>,
}

/// Issues, resolves, and revokes share links.
#[derive(Debug, Clone)]
pub struct ShareLinkService {
    store: Arc<dyn ShareLinkStore>,
    links: LinkService,
    clock: Arc<dyn Clock>,
    config: ShareConfig,
}

impl ShareLinkService {
    /// Creates a new share-link service.
    pub fn new(store: Arc<dyn ShareLinkStore>, clock: Arc<dyn Clock>, config: ShareConfig) -> Self {
        Self {
            store,
            links: LinkService::new(),
            clock,
            config,
        }
    }

    /// Issuance and resolution settings.
    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    /// Public path of a link, e.g. `/share/<token>`.
    pub fn url_for(&self, link: &ShareLink) -> String {
        format!("{}/{}", self.config.url_prefix.trim_end_matches('/'), link.token)
    }

    /// Issues a link to `resource_id` owned by the caller, applying the
    /// configured default TTL and use budget where `options` leave them out.
    pub async fn create_for(
        &self,
        ctx: &RequestContext,
        resource_id: NoteId,
        options: ShareOptions,
    ) -> AppResult<ShareLink> {
        let ttl_minutes = options.ttl_minutes.unwrap_or(self.config.default_ttl_minutes);
        if ttl_minutes == 0 {
            return Err(AppError::validation("ttl_minutes must be positive"));
        }
        let ttl_minutes = i64::try_from(ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::validation("ttl_minutes is too large"))?;
        let max_uses = options.max_uses.or(self.config.default_max_uses);

        self.issue(resource_id, ctx.user_id(), Some(ttl_minutes), max_uses)
            .await
    }

    /// Issues a new active link.
    ///
    /// No `ttl` means the link never expires by time; no `max_uses` means
    /// unlimited uses. A zero budget or a non-positive TTL is rejected.
    pub async fn issue(
        &self,
        resource_id: NoteId,
        owner_id: UserId,
        ttl: Option<Duration>,
        max_uses: Option<u32>,
    ) -> AppResult<ShareLink> {
        if ttl.is_some_and(|d| d <= Duration::zero()) {
            return Err(AppError::validation("Share link TTL must be positive"));
        }
        let remaining_uses = match max_uses {
            None => None,
            Some(0) => return Err(AppError::validation("max_uses must be at least 1")),
            Some(n) => Some(
                i32::try_from(n).map_err(|_| AppError::validation("max_uses is too large"))?,
            ),
        };

        let now = self.clock.now();
        let expires_at = match ttl {
            Some(d) => Some(
                now.checked_add_signed(d)
                    .ok_or_else(|| AppError::validation("Share link TTL is too large"))?,
            ),
            None => None,
        };

        let link = self
            .store
            .insert(NewShareLink {
                token: self.links.generate_token(),
                resource_id,
                owner_id,
                expires_at,
                remaining_uses,
                created_at: now,
            })
            .await?;

        info!(
            owner_id = %owner_id,
            resource_id = %resource_id,
            token = link.token_hint(),
            expires_at = ?link.expires_at,
            max_uses = ?link.remaining_uses,
            "Share link issued"
        );

        Ok(link)
    }

    /// Resolves `token` to its link, spending one use under
    /// [`ConsumePolicy::Consume`].
    ///
    /// Unknown, revoked, expired, and depleted links (including losing a
    /// race for the last use) all fail with the same not-found error.
    pub async fn resolve_and_consume(
        &self,
        token: &str,
        policy: ConsumePolicy,
    ) -> AppResult<ShareLink> {
        let hint = token_hint(token);

        let Some(link) = self.store.find_active_by_token(token).await? else {
            debug!(token = hint, reason = "unknown_or_inactive", "Share link not resolved");
            return Err(ShareLinkError::NotFoundOrExpired.into());
        };

        let now = self.clock.now();
        if link.is_expired_at(now) {
            debug!(token = hint, reason = "expired", "Share link not resolved");
            return Err(ShareLinkError::NotFoundOrExpired.into());
        }

        if link.remaining_uses.is_none() {
            return Ok(link);
        }

        match policy {
            ConsumePolicy::Peek if link.is_depleted() => {
                debug!(token = hint, reason = "depleted", "Share link not resolved");
                Err(ShareLinkError::NotFoundOrExpired.into())
            }
            ConsumePolicy::Peek => Ok(link),
            ConsumePolicy::Consume => match self.store.consume_use(link.id, now).await? {
                Some(updated) => {
                    if !updated.active {
                        info!(
                            token = hint,
                            resource_id = %updated.resource_id,
                            "Share link depleted"
                        );
                    }
                    Ok(updated)
                }
                None => {
                    debug!(token = hint, reason = "depleted", "Share link not resolved");
                    Err(ShareLinkError::NotFoundOrExpired.into())
                }
            },
        }
    }

    /// Lists the caller's links, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<ShareLink>> {
        self.store.list_by_owner(ctx.user_id()).await
    }

    /// Revokes one of the caller's links.
    pub async fn revoke(&self, ctx: &RequestContext, token: &str) -> AppResult<()> {
        if !self.store.deactivate(token, ctx.user_id()).await? {
            return Err(AppError::not_found("Share link not found"));
        }

        info!(
            user_id = %ctx.user_id(),
            token = token_hint(token),
            "Share link revoked"
        );
        Ok(())
    }
}
