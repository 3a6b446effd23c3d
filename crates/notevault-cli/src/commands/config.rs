//! Configuration management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use super::Cli;
use crate::output::{self, OutputFormat};
use notevault_api::AppState;
use notevault_core::config::AppConfig;
use notevault_core::error::AppError;
use notevault_core::traits::SystemClock;
use notevault_database::connection::mask_password;
use notevault_database::memory::{MemoryShareLinkStore, MemoryUserStore};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration (secret redacted)
    Show,
    /// Run the startup checks without binding a port
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    let config = cli.load_config()?;

    match &args.command {
        ConfigCommand::Show => {
            let redacted = redact(config);
            output::print_item(&redacted, format, |c| println!("{c:#?}"));
        }
        ConfigCommand::Validate => match validate(&config) {
            Ok(()) => {
                output::print_success(&format!(
                    "Configuration '{}' ({}) is valid",
                    cli.config, cli.env
                ));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Backend", &format!("{:?}", config.database.backend));
                output::print_kv("Database", &mask_password(&config.database.url));
                output::print_kv(
                    "Access rules",
                    &match config.auth.access_rules.len() {
                        0 => "built-in".to_string(),
                        n => n.to_string(),
                    },
                );
                if config.auth.jwt_secret.is_none() {
                    output::print_warning(
                        "auth.jwt_secret is unset; the server will generate one per start",
                    );
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Applies the same checks the server runs before binding.
fn validate(config: &AppConfig) -> Result<(), AppError> {
    AppState::new(
        config.clone(),
        Arc::new(MemoryShareLinkStore::new()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(SystemClock),
    )?;
    Ok(())
}

fn redact(mut config: AppConfig) -> AppConfig {
    if config.auth.jwt_secret.is_some() {
        config.auth.jwt_secret = Some("****".to_string());
    }
    config.database.url = mask_password(&config.database.url);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use notevault_core::config::{Access, AccessRuleConfig};
    use notevault_core::error::ErrorKind;

    #[test]
    fn test_weak_secret_fails_validation() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("short".to_string());
        let err = validate(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_bad_access_rule_fails_validation() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("x".repeat(32));
        config.auth.access_rules.push(AccessRuleConfig {
            method: Some("GET".to_string()),
            pattern: "/api/[".to_string(),
            access: Access::Public,
        });
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_defaults_with_strong_secret_pass() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("x".repeat(32));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_redact_hides_secret_and_password() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("x".repeat(32));
        let redacted = redact(config);
        assert_eq!(redacted.auth.jwt_secret.as_deref(), Some("****"));
        assert!(!redacted.database.url.contains(":notevault@"));
    }
}
