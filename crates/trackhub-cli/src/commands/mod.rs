//! CLI command definitions and dispatch.

pub mod browse;
pub mod catalog;
pub mod import;
pub mod index;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_database::Stores;

use crate::output::OutputFormat;

/// TrackHub: hierarchical path index and navigator for music catalogs
#[derive(Debug, Parser)]
#[command(name = "trackhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/<env>.toml`)
    #[arg(long, env = "TRACKHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the TrackHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Folder index build and audits
    Index(index::IndexArgs),
    /// List a directory
    Browse(browse::BrowseArgs),
    /// Search tracks by name
    Search(catalog::SearchArgs),
    /// List collections
    Collections,
    /// Import a path listing
    Import(import::ImportArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Index(args) => index::execute(args, &config, self.format).await,
            Commands::Browse(args) => browse::execute(args, &config, self.format).await,
            Commands::Search(args) => catalog::search(args, &config, self.format).await,
            Commands::Collections => catalog::collections(&config, self.format).await,
            Commands::Import(args) => import::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: open the configured stores
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    Stores::connect(&config.database).await
}
