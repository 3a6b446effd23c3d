//! In-memory share-link store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::types::{ShareLinkId, UserId};
use notevault_entity::share::{NewShareLink, ShareLink};

use crate::store::ShareLinkStore;

/// Share links held in concurrent maps.
#[derive(Debug, Default)]
pub struct MemoryShareLinkStore {
    links: DashMap<ShareLinkId, ShareLink>,
    by_token: DashMap<String, ShareLinkId>,
    next_id: AtomicI64,
}

impl MemoryShareLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links, active or not.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no link has been stored.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Snapshot of the link carrying `token`, regardless of state.
    pub fn get_by_token(&self, token: &str) -> Option<ShareLink> {
        let id = *self.by_token.get(token)?;
        self.links.get(&id).map(|l| l.clone())
    }
}

#[async_trait]
impl ShareLinkStore for MemoryShareLinkStore {
    async fn insert(&self, link: NewShareLink) -> AppResult<ShareLink> {
        let slot = match self.by_token.entry(link.token.clone()) {
            Entry::Occupied(_) => return Err(AppError::conflict("Share token collision")),
            Entry::Vacant(slot) => slot,
        };

        let id = ShareLinkId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let stored = ShareLink {
            id,
            token: link.token,
            resource_id: link.resource_id,
            owner_id: link.owner_id,
            expires_at: link.expires_at,
            remaining_uses: link.remaining_uses,
            active: true,
            created_at: link.created_at,
        };
        self.links.insert(id, stored.clone());
        slot.insert(id);
        Ok(stored)
    }

    async fn find_active_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        Ok(self.get_by_token(token).filter(|l| l.active))
    }

    async fn consume_use(
        &self,
        id: ShareLinkId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareLink>> {
        let Some(mut link) = self.links.get_mut(&id) else {
            return Ok(None);
        };

        if !link.is_usable_at(now) {
            return Ok(None);
        }

        if let Some(remaining) = link.remaining_uses {
            let left = remaining - 1;
            link.remaining_uses = Some(left);
            if left <= 0 {
                link.active = false;
            }
        }

        Ok(Some(link.clone()))
    }

    async fn deactivate(&self, token: &str, owner: UserId) -> AppResult<bool> {
        let Some(id) = self.by_token.get(token).map(|id| *id) else {
            return Ok(false);
        };
        let Some(mut link) = self.links.get_mut(&id) else {
            return Ok(false);
        };
        if link.owner_id != owner || !link.active {
            return Ok(false);
        }
        link.active = false;
        Ok(true)
    }

    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<ShareLink>> {
        let mut links: Vec<ShareLink> = self
            .links
            .iter()
            .filter(|l| l.owner_id == owner)
            .map(|l| l.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use notevault_core::types::NoteId;

    use super::*;

    fn new_link(token: &str, ttl: Option<Duration>, uses: Option<i32>) -> NewShareLink {
        let now = Utc::now();
        NewShareLink {
            token: token.to_string(),
            resource_id: NoteId(42),
            owner_id: UserId(7),
            expires_at: ttl.map(|d| now + d),
            remaining_uses: uses,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_token() {
        let store = MemoryShareLinkStore::new();
        store.insert(new_link("dup", None, None)).await.unwrap();
        let err = store.insert(new_link("dup", None, None)).await.unwrap_err();
        assert_eq!(err.kind, notevault_core::error::ErrorKind::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_consume_deactivates_at_zero() {
        let store = MemoryShareLinkStore::new();
        let link = store.insert(new_link("two", None, Some(2))).await.unwrap();
        let now = Utc::now();

        let first = store.consume_use(link.id, now).await.unwrap().unwrap();
        assert_eq!(first.remaining_uses, Some(1));
        assert!(first.active);

        let second = store.consume_use(link.id, now).await.unwrap().unwrap();
        assert_eq!(second.remaining_uses, Some(0));
        assert!(!second.active);

        assert!(store.consume_use(link.id, now).await.unwrap().is_none());
        assert!(store.find_active_by_token("two").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_unlimited_never_changes_budget() {
        let store = MemoryShareLinkStore::new();
        let link = store.insert(new_link("inf", None, None)).await.unwrap();
        for _ in 0..50 {
            let l = store.consume_use(link.id, Utc::now()).await.unwrap().unwrap();
            assert_eq!(l.remaining_uses, None);
            assert!(l.active);
        }
    }

    #[tokio::test]
    async fn test_consume_refuses_expired_link() {
        let store = MemoryShareLinkStore::new();
        let link = store
            .insert(new_link("old", Some(Duration::minutes(5)), Some(3)))
            .await
            .unwrap();
        let later = Utc::now() + Duration::minutes(10);
        assert!(store.consume_use(link.id, later).await.unwrap().is_none());
        assert_eq!(store.get_by_token("old").unwrap().remaining_uses, Some(3));
    }

    #[tokio::test]
    async fn test_deactivate_checks_owner() {
        let store = MemoryShareLinkStore::new();
        store.insert(new_link("mine", None, None)).await.unwrap();
        assert!(!store.deactivate("mine", UserId(8)).await.unwrap());
        assert!(store.deactivate("mine", UserId(7)).await.unwrap());
        assert!(!store.deactivate("mine", UserId(7)).await.unwrap());
        assert!(!store.deactivate("missing", UserId(7)).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_consume_spends_each_use_once() {
        let store = Arc::new(MemoryShareLinkStore::new());
        let link = store.insert(new_link("race", None, Some(5))).await.unwrap();

        let tasks = (0..64).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.consume_use(link.id, Utc::now()).await })
        });
        let results = futures::future::join_all(tasks).await;

        let successes = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(Some(_)))))
            .count();
        assert_eq!(successes, 5);

        let final_state = store.get_by_token("race").unwrap();
        assert_eq!(final_state.remaining_uses, Some(0));
        assert!(!final_state.active);
    }
}
