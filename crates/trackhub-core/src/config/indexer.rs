//! Folder index builder configuration.

use serde::{Deserialize, Serialize};

/// Tuning for full index rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Records fetched per scan page.
    #[serde(default = "default_scan_page_size")]
    pub scan_page_size: u64,
    /// Entries per upsert batch.
    #[serde(default = "default_upsert_chunk_size")]
    pub upsert_chunk_size: usize,
    /// Upsert batches in flight at once.
    #[serde(default = "default_upsert_concurrency")]
    pub upsert_concurrency: usize,
    /// Remove entries not produced by the latest successful rebuild.
    #[serde(default = "default_true")]
    pub purge_stale: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            scan_page_size: default_scan_page_size(),
            upsert_chunk_size: default_upsert_chunk_size(),
            upsert_concurrency: default_upsert_concurrency(),
            purge_stale: default_true(),
        }
    }
}

fn default_scan_page_size() -> u64 {
    1000
}

fn default_upsert_chunk_size() -> usize {
    100
}

fn default_upsert_concurrency() -> usize {
    10
}

fn default_true() -> bool {
    true
}
