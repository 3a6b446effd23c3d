//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod share;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{Access, AccessRuleConfig, AuthConfig};
pub use self::database::{DatabaseConfig, PersistenceBackend};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::share::{ConsumePolicy, ShareConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay + `NOTEVAULT__` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Share-link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables prefixed with `NOTEVAULT__` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NOTEVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_share_policy() {
        let config = AppConfig::default();
        assert_eq!(config.share.default_ttl_minutes, 120);
        assert_eq!(config.share.default_max_uses, None);
        assert_eq!(config.share.redirect_consumption, ConsumePolicy::Consume);
        assert_eq!(config.auth.default_access, Access::Authenticated);
        assert!(config.auth.access_rules.is_empty());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let raw = r#"
            [server]
            port = 9090

            [database]
            backend = "memory"

            [share]
            redirect_consumption = "peek"

            [[auth.access_rules]]
            method = "GET"
            pattern = "/api/public/**"
            access = "public"
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("config should deserialize");

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.backend, PersistenceBackend::Memory);
        assert_eq!(config.share.redirect_consumption, ConsumePolicy::Peek);
        assert_eq!(config.auth.access_rules.len(), 1);
        assert_eq!(config.auth.access_rules[0].access, Access::Public);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
