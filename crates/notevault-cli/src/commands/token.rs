//! Bearer token commands.

use std::sync::Arc;

use chrono::Duration;
use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use notevault_auth::jwt::TokenCodec;
use notevault_core::config::AppConfig;
use notevault_core::error::AppError;
use notevault_core::traits::SystemClock;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a token for a subject with the configured secret
    Issue {
        /// Subject (account email)
        #[arg(short, long)]
        subject: String,
        /// Lifetime in minutes; defaults to `auth.token_ttl_minutes`
        #[arg(short, long)]
        ttl_minutes: Option<u64>,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            subject,
            ttl_minutes,
        } => {
            let codec = codec_from_config(config)?;
            let issued = match ttl_minutes {
                Some(minutes) => codec.issue(subject, minutes_to_duration(*minutes)?)?,
                None => codec.issue_default(subject)?,
            };

            output::print_item(&issued, format, |t| {
                println!("{}", t.token);
                output::print_kv("Expires", &t.expires_at.to_rfc3339());
            });
        }
    }
    Ok(())
}

/// Builds a codec over the configured secret.
///
/// A generated secret would sign tokens no server accepts, so an unset
/// secret is an error here.
fn codec_from_config(config: &AppConfig) -> Result<TokenCodec, AppError> {
    let secret = config.auth.jwt_secret.as_deref().ok_or_else(|| {
        AppError::configuration("auth.jwt_secret is not set; run `notevault secret generate`")
    })?;
    let ttl = minutes_to_duration(config.auth.token_ttl_minutes)?;
    Ok(TokenCodec::new(secret.as_bytes(), ttl, Arc::new(SystemClock))?)
}

fn minutes_to_duration(minutes: u64) -> Result<Duration, AppError> {
    i64::try_from(minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| AppError::validation(format!("TTL of {minutes} minutes is too large")))
}
