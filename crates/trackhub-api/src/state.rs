//! Application state shared across all handlers.

use std::sync::Arc;

use trackhub_core::config::AppConfig;
use trackhub_database::Stores;
use trackhub_service::{CatalogService, FolderIndexAuditor, FolderIndexBuilder, Navigator};

/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Record store and folder index
    pub stores: Stores,
    /// Directory listings
    pub navigator: Arc<Navigator>,
    /// Search and collections
    pub catalog: Arc<CatalogService>,
    /// Folder index rebuilds; shared with the scheduled rebuild job
    pub builder: Arc<FolderIndexBuilder>,
    /// Folder index audits
    pub auditor: Arc<FolderIndexAuditor>,
}

impl AppState {
    /// Construct every service from the configuration and stores.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let navigator = Navigator::new(
            stores.records.clone(),
            stores.folders.clone(),
            &config.navigator,
        );
        let catalog = CatalogService::new(stores.records.clone(), &config.navigator);
        let builder = FolderIndexBuilder::new(
            stores.records.clone(),
            stores.folders.clone(),
            config.indexer.clone(),
        );
        let auditor = FolderIndexAuditor::new(
            stores.records.clone(),
            stores.folders.clone(),
            config.navigator.skip_scan_limit,
        );

        Self {
            config: Arc::new(config),
            stores,
            navigator: Arc::new(navigator),
            catalog: Arc::new(catalog),
            builder: Arc::new(builder),
            auditor: Arc::new(auditor),
        }
    }
}
