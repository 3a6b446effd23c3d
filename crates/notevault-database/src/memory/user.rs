//! In-memory user store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_core::types::UserId;
use notevault_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// User accounts keyed by lowercased email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(&email.to_lowercase())
            .map(|u| u.value().clone()))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        match self.users.entry(data.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already registered")),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1),
                    email: data.email,
                    password_hash: data.password_hash,
                    role: data.role,
                    created_at: Utc::now(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use notevault_entity::user::Role;

    use super::*;

    fn create(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = MemoryUserStore::new();
        let user = store.create(create("Alice@Example.com")).await.unwrap();
        let found = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "Alice@Example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(create("bob@example.com")).await.unwrap();
        let err = store.create(create("BOB@example.com")).await.unwrap_err();
        assert_eq!(err.kind, notevault_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryUserStore::new();
        let a = store.create(create("a@example.com")).await.unwrap();
        let b = store.create(create("b@example.com")).await.unwrap();
        assert_eq!(a.id, UserId(1));
        assert_eq!(b.id, UserId(2));
    }
}
