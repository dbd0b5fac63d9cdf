//! Search and collections commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_service::CatalogService;

use crate::output::{self, OutputFormat};

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to match against track names
    pub query: String,

    #[arg(short, long)]
    pub collection: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct TrackRow {
    name: String,
    collection: String,
    path: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CollectionRow {
    collection: String,
    tracks: i64,
}

/// Execute the search command
pub async fn search(
    args: &SearchArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let catalog = CatalogService::new(stores.records, &config.navigator);

    let rows: Vec<TrackRow> = catalog
        .search(&args.query, args.collection.as_deref())
        .await?
        .into_iter()
        .map(|r| TrackRow {
            name: r.display_name,
            collection: r.collection_id,
            path: r.path,
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Execute the collections command
pub async fn collections(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let catalog = CatalogService::new(stores.records, &config.navigator);

    let rows: Vec<CollectionRow> = catalog
        .list_collections()
        .await?
        .into_iter()
        .map(|c| CollectionRow {
            collection: c.collection_id,
            tracks: c.track_count,
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
