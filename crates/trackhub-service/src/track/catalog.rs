//! Collections listing and track search.

use std::sync::Arc;

use tracing::debug;

use trackhub_core::config::NavigatorConfig;
use trackhub_core::result::AppResult;
use trackhub_database::PathRecordStore;
use trackhub_entity::track::{CollectionSummary, PathRecord};

use crate::scope;

/// Read-only queries against the record store.
#[derive(Debug, Clone)]
pub struct CatalogService {
    records: Arc<dyn PathRecordStore>,
    search_limit: u64,
    min_query_len: usize,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(records: Arc<dyn PathRecordStore>, config: &NavigatorConfig) -> Self {
        Self {
            records,
            search_limit: config.search_limit.max(1),
            min_query_len: config.search_min_query_len,
        }
    }

    /// Every collection with records, sorted by id.
    pub async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        self.records
            .list_collections()
            .await
            .map_err(|e| e.into_source_unavailable())
    }

    /// Case-insensitive substring search on display names.
    ///
    /// Queries shorter than the configured minimum (after trimming) return
    /// nothing rather than an error.
    pub async fn search(
        &self,
        query: &str,
        collection: Option<&str>,
    ) -> AppResult<Vec<PathRecord>> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            debug!(query, "Search query below minimum length");
            return Ok(Vec::new());
        }
        self.records
            .search_by_name(scope::normalize(collection), query, self.search_limit)
            .await
            .map_err(|e| e.into_source_unavailable())
    }
}

#[cfg(test)]
mod tests {
    use trackhub_database::memory::MemoryPathRecordStore;

    use super::*;
    use crate::testing::{UnavailableRecords, seed};

    async fn service() -> CatalogService {
        let records = MemoryPathRecordStore::new();
        seed(
            &records,
            &[
                ("BEATPORT", "/BP/2025/Disclosure - Latch.mp3"),
                ("BEATPORT", "/BP/2025/Latch (Extended).mp3"),
                ("RETRO", "/80s/Latchkey Kids.mp3"),
            ],
        )
        .await;
        let config = NavigatorConfig {
            search_limit: 2,
            ..NavigatorConfig::default()
        };
        CatalogService::new(Arc::new(records), &config)
    }

    #[tokio::test]
    async fn test_short_query_is_empty() {
        let svc = service().await;
        assert!(svc.search(" l ", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_capped_and_scoped() {
        let svc = service().await;
        let all = svc.search("LATCH", None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].path, "/80s/Latchkey Kids.mp3");

        let retro = svc.search("latch", Some("RETRO")).await.unwrap();
        assert_eq!(retro.len(), 1);
    }

    #[tokio::test]
    async fn test_collections() {
        let svc = service().await;
        let cols = svc.list_collections().await.unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].collection_id, "BEATPORT");
        assert_eq!(cols[0].track_count, 2);
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let svc = CatalogService::new(Arc::new(UnavailableRecords), &NavigatorConfig::default());
        assert!(svc.search("latch", None).await.unwrap_err().is_source_unavailable());
    }
}
