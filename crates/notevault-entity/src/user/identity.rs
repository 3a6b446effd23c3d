//! The caller identity attached to an authenticated request.

use serde::{Deserialize, Serialize};

use notevault_core::types::UserId;

use super::model::User;
use super::role::Role;

/// Who is making the current request.
///
/// Resolved from the bearer-token subject once per request and discarded
/// when the request ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Account id of the subject.
    pub user_id: UserId,
    /// Token subject (the account email).
    pub subject: String,
    /// Roles granted to the account.
    pub roles: Vec<Role>,
}

impl Identity {
    /// Returns whether the identity holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the identity holds every role in `required`.
    pub fn has_all(&self, required: &[Role]) -> bool {
        required.iter().all(|r| self.has_role(*r))
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            subject: user.email.clone(),
            roles: vec![user.role],
        }
    }
}
