//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for bearer-token signing (HMAC-SHA256).
    ///
    /// When absent a random secret is generated at startup, which means
    /// issued tokens do not survive a restart.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Bearer token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Ordered route protection rules. Empty selects the built-in policy.
    #[serde(default)]
    pub access_rules: Vec<AccessRuleConfig>,
    /// Access level applied when no rule matches.
    #[serde(default)]
    pub default_access: Access,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_minutes: default_token_ttl(),
            access_rules: Vec::new(),
            default_access: Access::default(),
        }
    }
}

/// Whether a route may be reached anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Anyone, with or without a bearer token.
    Public,
    /// Only requests carrying a valid bearer token for a known user.
    #[default]
    Authenticated,
}

/// One `(method, path-pattern) -> access` rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRuleConfig {
    /// HTTP method; `None` matches every method.
    #[serde(default)]
    pub method: Option<String>,
    /// Glob over the request path (`*` = one segment, `**` = any depth).
    pub pattern: String,
    /// Access level granted when the rule matches.
    pub access: Access,
}

fn default_token_ttl() -> u64 {
    60
}
