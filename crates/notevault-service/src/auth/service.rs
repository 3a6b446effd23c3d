//! Credential checks and token issuance for accounts.

use std::sync::Arc;

use tracing::{info, warn};

use notevault_auth::jwt::{IssuedToken, TokenCodec};
use notevault_auth::password::{CredentialVerifier, PasswordHasher, PasswordPolicy};
use notevault_core::error::AppError;
use notevault_core::result::AppResult;
use notevault_database::store::UserStore;
use notevault_entity::user::{CreateUser, Role, User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Checked against on unknown emails so both failure paths pay for one hash.
const DECOY_PASSWORD: &str = "notevault-decoy-password";

/// Registers accounts and exchanges credentials for bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    verifier: Arc<dyn CredentialVerifier>,
    codec: Arc<TokenCodec>,
    policy: PasswordPolicy,
    decoy_hash: Option<Arc<str>>,
}

impl AuthService {
    /// Creates a new auth service backed by Argon2id.
    pub fn new(users: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        let hasher = PasswordHasher::new();
        let decoy_hash = hasher.hash_password(DECOY_PASSWORD).ok().map(Arc::from);
        Self {
            users,
            hasher,
            verifier: Arc::new(PasswordHasher::new()),
            codec,
            policy: PasswordPolicy::default(),
            decoy_hash,
        }
    }

    /// Replaces the credential verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Creates an account with the `user` role.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        self.create_account(email, password, Role::User).await
    }

    /// Creates an account with an explicit role.
    pub async fn create_account(&self, email: &str, password: &str, role: Role) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        self.policy.validate(password)?;

        let user = self
            .users
            .create(CreateUser {
                email: email.to_string(),
                password_hash: self.hasher.hash_password(password)?,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a bearer token for the account.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            if let Some(decoy) = &self.decoy_hash {
                let _ = self.verifier.verify(password, decoy);
            }
            warn!("Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.verifier.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let issued = self.codec.issue_default(&user.email)?;
        info!(user_id = %user.id, expires_at = %issued.expires_at, "User logged in");
        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use notevault_core::error::ErrorKind;
    use notevault_core::traits::ManualClock;
    use notevault_database::memory::MemoryUserStore;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Default)]
    struct CountingVerifier {
        calls: AtomicUsize,
    }

    impl CredentialVerifier for CountingVerifier {
        fn verify(&self, plaintext: &str, stored_hash: &str) -> AppResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PasswordHasher::new().verify(plaintext, stored_hash)
        }
    }

    fn service() -> (AuthService, Arc<TokenCodec>) {
        let codec = Arc::new(
            TokenCodec::new(
                b"0123456789abcdef0123456789abcdef",
                Duration::hours(1),
                Arc::new(ManualClock::starting_now()),
            )
            .unwrap(),
        );
        let service = AuthService::new(Arc::new(MemoryUserStore::new()), codec.clone());
        (service, codec)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, codec) = service();
        let user = service.register("alice@example.com", "s3cret-pass").await.unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "s3cret-pass");

        let issued = service.login("alice@example.com", "s3cret-pass").await.unwrap();
        assert_eq!(codec.verify(&issued.token).unwrap(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service.register("alice@example.com", "s3cret-pass").await.unwrap();

        let wrong_password = service.login("alice@example.com", "nope-nope").await.unwrap_err();
        let unknown_email = service.login("bob@example.com", "s3cret-pass").await.unwrap_err();
        assert_eq!(wrong_password.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong_password.message, unknown_email.message);
        assert_eq!(unknown_email.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_register_validates_and_detects_duplicates() {
        let (service, _) = service();
        assert_eq!(
            service.register("not-an-email", "long-enough").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            service.register("a@example.com", "short").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        service.register("a@example.com", "long-enough").await.unwrap();
        assert_eq!(
            service.register("A@example.com", "long-enough").await.unwrap_err().kind,
            ErrorKind::Conflict
        );
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_a_hash_check() {
        let (service, _) = service();
        let counter = Arc::new(CountingVerifier::default());
        let service = service.with_verifier(counter.clone());
        service.register("alice@example.com", "s3cret-pass").await.unwrap();

        service.login("bob@example.com", "s3cret-pass").await.unwrap_err();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 1);

        service.login("alice@example.com", "wrong-pass").await.unwrap_err();
        assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_decoy_hash_never_matches_a_guess() {
        let (service, _) = service();
        let decoy = service.decoy_hash.as_deref().expect("decoy hash");
        assert!(!PasswordHasher::new().verify("s3cret-pass", decoy).unwrap());
    }
}
