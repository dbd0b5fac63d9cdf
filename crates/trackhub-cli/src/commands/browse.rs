//! Directory listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_entity::track::PathRecord;
use trackhub_service::Navigator;

use crate::output::{self, OutputFormat};

/// Arguments for the browse command
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Directory to list
    #[arg(default_value = "/")]
    pub path: String,

    /// Restrict to one collection
    #[arg(short, long)]
    pub collection: Option<String>,
}

/// One listing row
#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "type")]
    entry_type: &'static str,
    name: String,
    collection: String,
    kind: String,
}

impl EntryRow {
    fn folder(name: String) -> Self {
        Self {
            entry_type: "folder",
            name,
            collection: String::new(),
            kind: String::new(),
        }
    }

    fn file(record: &PathRecord) -> Self {
        Self {
            entry_type: "file",
            name: record.file_name().to_string(),
            collection: record.collection_id.clone(),
            kind: record.kind.to_string(),
        }
    }
}

/// Execute the browse command
pub async fn execute(
    args: &BrowseArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let navigator = Navigator::new(stores.records, stores.folders, &config.navigator);

    let listing = navigator
        .list_scoped(args.collection.as_deref(), &args.path)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&listing),
        OutputFormat::Table => {
            println!("{}", listing.path);
            let files: Vec<EntryRow> = listing.files.iter().map(EntryRow::file).collect();
            let rows: Vec<EntryRow> = listing
                .folders
                .into_iter()
                .map(EntryRow::folder)
                .chain(files)
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
