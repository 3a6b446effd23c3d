//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod secret;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use notevault_core::config::AppConfig;
use notevault_core::error::AppError;

/// NoteVault administration CLI
#[derive(Debug, Parser)]
#[command(name = "notevault", version, about, long_about = None)]
pub struct Cli {
    /// Environment overlay (`config/{env}.toml`)
    #[arg(short, long, env = "NOTEVAULT_ENV", default_value = "development")]
    pub env: String,

    /// Base configuration file, without extension
    #[arg(short, long, env = "NOTEVAULT_CONFIG", default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Signing secret utilities
    Secret(secret::SecretArgs),
    /// Bearer token utilities
    Token(token::TokenArgs),
    /// Account management
    User(user::UserArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Secret(args) => secret::execute(args, self.format),
            Commands::Token(args) => token::execute(args, &self.load_config()?, self.format),
            Commands::User(args) => user::execute(args, &self.load_config()?, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, &self.load_config()?).await,
            Commands::Config(args) => config::execute(args, self, self.format),
        }
    }

    /// Load the merged configuration for the selected environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(&self.config, &self.env)
    }
}
