//! Catalog schema migrations.

use clap::{Args, Subcommand};

use trackhub_core::config::{AppConfig, StoreProvider};
use trackhub_core::error::AppError;
use trackhub_database::DatabasePool;
use trackhub_database::migration::{pending_migrations, run_migrations};

use crate::output;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations to the catalog database
    Run,
    /// List migrations that have not been applied
    Status,
}

/// The memory provider has no schema, so both subcommands are no-ops there.
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider == StoreProvider::Memory {
        output::print_warning("Memory provider configured; there is no schema to migrate.");
        return Ok(());
    }
    let db = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            run_migrations(db.pool()).await?;
            output::print_success("Catalog schema is up to date.");
        }
        MigrateCommand::Status => {
            let pending = pending_migrations(db.pool()).await?;
            if pending.is_empty() {
                output::print_success("No pending migrations.");
            } else {
                output::print_warning(&format!("{} pending migration(s):", pending.len()));
                for name in &pending {
                    println!("  {name}");
                }
            }
        }
    }
    Ok(())
}
