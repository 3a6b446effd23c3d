//! Signing secret commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use notevault_auth::jwt::{MIN_SECRET_BITS, generate_secret};
use notevault_core::error::AppError;

/// Arguments for secret commands
#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Secret subcommand
    #[command(subcommand)]
    pub command: SecretCommand,
}

/// Secret subcommands
#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// Print a fresh random signing secret for `auth.jwt_secret`
    Generate,
}

#[derive(Debug, Serialize)]
struct GeneratedSecret {
    secret: String,
    bits: usize,
}

/// Execute secret commands
pub fn execute(args: &SecretArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        SecretCommand::Generate => {
            let secret = GeneratedSecret {
                secret: generate_secret(),
                bits: MIN_SECRET_BITS,
            };
            output::print_item(&secret, format, |s| {
                println!("{}", s.secret);
                println!();
                println!("Set it as auth.jwt_secret or NOTEVAULT__AUTH__JWT_SECRET.");
            });
        }
    }
    Ok(())
}
