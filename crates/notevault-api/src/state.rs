//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use notevault_auth::gate::{AccessPolicy, AuthenticationGate, UserStoreLookup};
use notevault_auth::jwt::{TokenCodec, generate_secret};
use notevault_core::config::AppConfig;
use notevault_core::error::ConfigError;
use notevault_core::traits::Clock;
use notevault_database::store::{ShareLinkStore, UserStore};
use notevault_service::{AuthService, ShareLinkService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Time source for request contexts and expiry checks
    pub clock: Arc<dyn Clock>,
    /// Bearer token verification and identity resolution
    pub gate: Arc<AuthenticationGate>,
    /// Route access rules
    pub policy: Arc<AccessPolicy>,
    /// Share-link lifecycle
    pub share_service: Arc<ShareLinkService>,
    /// Registration and login
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires services over the given stores.
    ///
    /// Fails when the signing secret is weak, the token TTL is zero, or an
    /// access rule does not compile. A missing secret is replaced by a
    /// random one, so tokens do not outlive the process.
    pub fn new(
        config: AppConfig,
        share_store: Arc<dyn ShareLinkStore>,
        user_store: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let secret = match config.auth.jwt_secret.as_deref() {
            Some(secret) => secret.to_string(),
            None => {
                warn!("No auth.jwt_secret configured; generated a random one, tokens will not survive a restart");
                generate_secret()
            }
        };

        let ttl_minutes = i64::try_from(config.auth.token_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| ConfigError::Invalid("auth.token_ttl_minutes is too large".to_string()))?;
        let codec = Arc::new(TokenCodec::new(secret.as_bytes(), ttl_minutes, Arc::clone(&clock))?);

        let lookup = Arc::new(UserStoreLookup::new(Arc::clone(&user_store)));
        let gate = Arc::new(AuthenticationGate::new(Arc::clone(&codec), lookup));
        let policy = Arc::new(AccessPolicy::from_config(&config.auth)?);
        for rule in policy.rules() {
            debug!(
                method = rule.method().map_or("*", |m| m.as_str()),
                pattern = rule.pattern(),
                access = ?rule.access(),
                "Access rule"
            );
        }

        let share_service = Arc::new(ShareLinkService::new(
            share_store,
            Arc::clone(&clock),
            config.share.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(user_store, codec));

        Ok(Self {
            config: Arc::new(config),
            clock,
            gate,
            policy,
            share_service,
            auth_service,
        })
    }
}
