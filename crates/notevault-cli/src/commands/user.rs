//! Account management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use notevault_api::AppState;
use notevault_api::app::open_stores;
use notevault_core::config::AppConfig;
use notevault_core::error::AppError;
use notevault_core::traits::SystemClock;
use notevault_entity::user::Role;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account, prompting for the password
    Create {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Grant the admin role
        #[arg(long)]
        admin: bool,
    },
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        UserCommand::Create { email, admin } => {
            let password = dialoguer::Password::new()
                .with_prompt(format!("Password for {email}"))
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            let stores = open_stores(config).await?;
            if stores.pool.is_none() {
                output::print_warning("In-memory backend: the account is discarded on exit");
            }

            let state = AppState::new(
                config.clone(),
                stores.share_links,
                stores.users,
                Arc::new(SystemClock),
            )?;
            let role = if *admin { Role::Admin } else { Role::User };
            let result = state
                .auth_service
                .create_account(email, &password, role)
                .await;

            if let Some(pool) = &stores.pool {
                pool.close().await;
            }
            let user = result?;

            output::print_item(&user, format, |u| {
                output::print_success(&format!("Account '{}' created", u.email));
                output::print_kv("ID", &u.id.to_string());
                output::print_kv("Role", &format!("{:?}", u.role));
            });
        }
    }

    Ok(())
}
