//! Resolving a token subject to an identity.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use notevault_core::result::AppResult;
use notevault_database::store::UserStore;
use notevault_entity::user::Identity;

/// Maps a verified token subject to the caller's identity.
#[async_trait]
pub trait IdentityLookup: Send + Sync + Debug + 'static {
    /// `Ok(None)` when the subject names no known account.
    async fn lookup(&self, subject: &str) -> AppResult<Option<Identity>>;
}

/// Resolves subjects as account emails through a [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserStoreLookup {
    users: Arc<dyn UserStore>,
}

impl UserStoreLookup {
    /// Wraps a user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityLookup for UserStoreLookup {
    async fn lookup(&self, subject: &str) -> AppResult<Option<Identity>> {
        let user = self.users.find_by_email(subject).await?;
        Ok(user.as_ref().map(Identity::from))
    }
}
