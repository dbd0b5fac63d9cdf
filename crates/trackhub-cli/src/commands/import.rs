//! Listing import command.

use std::path::{Path, PathBuf};

use clap::Args;
use tokio::io::AsyncReadExt;

use trackhub_core::config::AppConfig;
use trackhub_core::error::{AppError, ErrorKind};
use trackhub_service::{FolderIndexBuilder, ListingImporter};

use crate::output::{self, OutputFormat};

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Collection the paths belong to
    #[arg(short, long)]
    pub collection: String,

    /// Listing file with one absolute path per line (`-` for stdin)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Rebuild the collection's folder index afterwards
    #[arg(long)]
    pub rebuild: bool,
}

/// Execute the import command
pub async fn execute(
    args: &ImportArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let listing = read_listing(&args.file).await?;
    let stores = super::open_stores(config).await?;

    let importer = ListingImporter::new(stores.records.clone(), config.indexer.upsert_chunk_size);
    let report = importer.import(&args.collection, listing.lines()).await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_kv("Accepted", &report.accepted.to_string());
            output::print_kv("Rejected", &report.rejected.to_string());
            output::print_kv("Written", &report.written.to_string());
            output::print_kv("Failed batches", &report.failed_batches.to_string());
        }
    }
    if report.failed_batches > 0 {
        output::print_warning("Some batches failed; re-running the import is safe.");
    }

    if args.rebuild {
        let builder = FolderIndexBuilder::new(
            stores.records.clone(),
            stores.folders.clone(),
            config.indexer.clone(),
        );
        let build = builder.build_index(Some(&args.collection)).await?;
        output::print_success(&format!(
            "Folder index rebuilt: {} folders.",
            build.folders_written
        ));
    }
    Ok(())
}

async fn read_listing(file: &Path) -> Result<String, AppError> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    } else {
        tokio::fs::read_to_string(file).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read {}: {e}", file.display()),
                e,
            )
        })
    }
}
