//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use notevault_core::config::{AppConfig, PersistenceBackend};
use notevault_core::error::AppError;
use notevault_database::connection::{DatabasePool, mask_password};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == PersistenceBackend::Memory {
        output::print_warning("database.backend is \"memory\"; nothing to migrate");
        return Ok(());
    }

    match &args.command {
        MigrateCommand::Run => {
            println!(
                "Running database migrations against {}...",
                mask_password(&config.database.url)
            );
            let pool = DatabasePool::connect(&config.database).await?;
            let result = notevault_database::migration::run_migrations(pool.pool()).await;
            pool.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
