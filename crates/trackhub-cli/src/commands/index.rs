//! Folder index commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_service::{FolderIndexAuditor, FolderIndexBuilder};

use crate::output::{self, OutputFormat};

/// Arguments for index commands
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Index subcommand
    #[command(subcommand)]
    pub command: IndexCommand,
}

/// Index subcommands
#[derive(Debug, Subcommand)]
pub enum IndexCommand {
    /// Rebuild the folder index from the path records
    Build {
        /// Restrict the rebuild to one collection
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// Compare one directory of the index with the records
    Verify {
        /// Directory to check
        #[arg(default_value = "/")]
        path: String,
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// List directories whose tracks are hidden by child folders
    Mixed {
        #[arg(short, long)]
        collection: Option<String>,
    },
}

/// Mixed-content display row
#[derive(Debug, Serialize, Tabled)]
struct MixedRow {
    collection: String,
    path: String,
    direct_tracks: i64,
}

/// Execute index commands
///
/// A build that completes with failed batches still succeeds; only a scan
/// failure returns an error.
pub async fn execute(
    args: &IndexArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    match &args.command {
        IndexCommand::Build { collection } => {
            let builder = FolderIndexBuilder::new(
                stores.records.clone(),
                stores.folders.clone(),
                config.indexer.clone(),
            );
            let report = builder.build_index(collection.as_deref()).await?;

            match format {
                OutputFormat::Json => output::print_json(&report),
                OutputFormat::Table => {
                    output::print_kv("Build", &report.build_id.to_string());
                    output::print_kv("Records scanned", &report.records_scanned.to_string());
                    output::print_kv("Folders written", &report.folders_written.to_string());
                    output::print_kv("Failed batches", &report.failed_batches.to_string());
                    output::print_kv("Stale removed", &report.stale_removed.to_string());
                }
            }
            if report.is_complete() {
                output::print_success("Folder index rebuilt.");
            } else {
                output::print_warning(&format!(
                    "{} batch(es) failed; re-run to complete the index.",
                    report.failed_batches
                ));
            }
        }
        IndexCommand::Verify { path, collection } => {
            let auditor = FolderIndexAuditor::new(
                stores.records.clone(),
                stores.folders.clone(),
                config.navigator.skip_scan_limit,
            );
            let audit = auditor.verify(collection.as_deref(), path).await?;

            match format {
                OutputFormat::Json => output::print_json(&audit),
                OutputFormat::Table => {
                    output::print_kv("Path", &audit.path);
                    output::print_kv("Indexed", &audit.indexed.len().to_string());
                    output::print_kv("Scanned", &audit.scanned.len().to_string());
                    output::print_kv("Missing from index", &audit.missing_from_index.join(", "));
                    output::print_kv("Unknown to source", &audit.unknown_to_source.join(", "));
                    if audit.truncated {
                        output::print_warning("Scan stopped at the probe limit.");
                    }
                }
            }
            if audit.is_consistent() {
                output::print_success("Index matches the records.");
            } else {
                output::print_warning("Index is out of date; run `trackhub index build`.");
            }
        }
        IndexCommand::Mixed { collection } => {
            let auditor = FolderIndexAuditor::new(
                stores.records.clone(),
                stores.folders.clone(),
                config.navigator.skip_scan_limit,
            );
            let rows: Vec<MixedRow> = auditor
                .mixed_content(collection.as_deref())
                .await?
                .into_iter()
                .map(|e| MixedRow {
                    collection: e.collection_id,
                    path: e.full_path,
                    direct_tracks: e.direct_track_count,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
