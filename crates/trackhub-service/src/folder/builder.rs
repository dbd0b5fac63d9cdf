//! Folder index builder.
//!
//! Scans the path record store page by page, derives every directory the
//! record paths imply, and upserts one [`FolderIndexEntry`] per directory.
//! Counts are computed from the fresh scan on every run, so a rebuild
//! replaces rather than adds to previous values.
//!
//! Runs sharing one builder (the HTTP surface and the cron job in the same
//! process) are serialized. Runs from separate processes stay safe because
//! the stores never let an older build overwrite or purge a newer one.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use tokio::sync::{Mutex, OwnedMutexGuard};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use trackhub_core::config::IndexerConfig;
use trackhub_core::error::AppError;
use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_database::{FolderIndexStore, PathRecordStore};
use trackhub_entity::folder::FolderIndexEntry;
use trackhub_entity::track::PathRecord;

use crate::scope;

/// Outcome of one rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Identifier stamped on every entry written by this run.
    pub build_id: Uuid,
    /// Records read from the store.
    pub records_scanned: u64,
    /// Unique directories successfully written.
    pub folders_written: u64,
    /// Upsert batches that failed and were skipped.
    pub failed_batches: u64,
    /// Entries from earlier runs removed after a complete run.
    pub stale_removed: u64,
}

impl BuildReport {
    /// Whether every batch was written.
    pub fn is_complete(&self) -> bool {
        self.failed_batches == 0
    }
}

/// Rebuilds the folder index from the record store.
#[derive(Debug, Clone)]
pub struct FolderIndexBuilder {
    records: Arc<dyn PathRecordStore>,
    folders: Arc<dyn FolderIndexStore>,
    config: IndexerConfig,
    running: Arc<Mutex<()>>,
}

impl FolderIndexBuilder {
    /// Creates a new builder.
    pub fn new(
        records: Arc<dyn PathRecordStore>,
        folders: Arc<dyn FolderIndexStore>,
        config: IndexerConfig,
    ) -> Self {
        Self {
            records,
            folders,
            config,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Like [`build_index`](Self::build_index), but fails with
    /// [`ErrorKind::Conflict`](trackhub_core::error::ErrorKind) instead of
    /// waiting when another run holds the builder.
    pub async fn try_build_index(&self, collection: Option<&str>) -> AppResult<BuildReport> {
        let guard = Arc::clone(&self.running)
            .try_lock_owned()
            .map_err(|_| AppError::conflict("A folder index rebuild is already running"))?;
        self.run(collection, guard).await
    }

    /// Keep rebuilds from starting until the guard is dropped.
    pub async fn hold(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.running).lock_owned().await
    }

    /// Rebuild the index for one collection, or for every collection when
    /// `collection` is `None`.
    ///
    /// A record store failure during the scan aborts the run with
    /// [`ErrorKind::SourceUnavailable`](trackhub_core::error::ErrorKind).
    /// Failed upsert batches are logged, counted and skipped; stale entries
    /// are only purged when no batch failed. Waits for any run already in
    /// progress on this builder.
    pub async fn build_index(&self, collection: Option<&str>) -> AppResult<BuildReport> {
        let guard = self.hold().await;
        self.run(collection, guard).await
    }

    async fn run(
        &self,
        collection: Option<&str>,
        _guard: OwnedMutexGuard<()>,
    ) -> AppResult<BuildReport> {
        let scope = scope::normalize(collection);
        let build_id = Uuid::now_v7();
        info!(
            build_id = %build_id,
            collection = scope.unwrap_or("*"),
            "Folder index rebuild started"
        );

        let (records_scanned, entries) = self.scan(scope, build_id).await?;
        info!(
            build_id = %build_id,
            records = records_scanned,
            folders = entries.len(),
            "Scan complete"
        );

        let (folders_written, failed_batches) = self.write(&entries).await;

        let mut stale_removed = 0;
        if failed_batches > 0 {
            warn!(
                build_id = %build_id,
                failed_batches,
                "Skipping stale purge after failed batches"
            );
        } else if self.config.purge_stale {
            match self.folders.delete_stale(scope, build_id).await {
                Ok(removed) => {
                    stale_removed = removed;
                    info!(build_id = %build_id, removed, "Stale folder entries purged");
                }
                Err(e) => error!(build_id = %build_id, error = %e, "Stale purge failed"),
            }
        }

        let report = BuildReport {
            build_id,
            records_scanned,
            folders_written,
            failed_batches,
            stale_removed,
        };
        info!(
            build_id = %build_id,
            folders_written,
            failed_batches,
            stale_removed,
            "Folder index rebuild finished"
        );
        Ok(report)
    }

    async fn scan(
        &self,
        scope: Option<&str>,
        build_id: Uuid,
    ) -> AppResult<(u64, Vec<FolderIndexEntry>)> {
        let now = Utc::now();
        let mut tree = FolderTree::default();
        let mut scanned = 0u64;
        let mut range = ScanRange::first(self.config.scan_page_size);

        loop {
            let page = self.records.fetch_range(scope, range).await.map_err(|e| {
                error!(offset = range.offset, error = %e, "Record scan failed");
                e.into_source_unavailable()
            })?;
            scanned += page.len() as u64;
            debug!(offset = range.offset, fetched = page.len(), "Scanned record page");

            for record in &page {
                tree.add(record);
            }
            if range.is_last(page.len()) {
                break;
            }
            range = range.next();
        }

        Ok((scanned, tree.into_entries(build_id, now)))
    }

    /// Upsert entries in chunks with bounded concurrency. Returns
    /// `(written, failed_batches)`.
    async fn write(&self, entries: &[FolderIndexEntry]) -> (u64, u64) {
        let chunk_size = self.config.upsert_chunk_size.max(1);
        let concurrency = self.config.upsert_concurrency.max(1);
        let folders = &self.folders;

        let batches: Vec<_> = entries
            .chunks(chunk_size)
            .enumerate()
            .map(|(index, chunk)| async move {
                (index, chunk.len(), folders.upsert_batch(chunk).await)
            })
            .collect();

        let results: Vec<(usize, usize, AppResult<u64>)> =
            stream::iter(batches)
                .buffer_unordered(concurrency)
                .collect()
                .await;

        let mut written = 0;
        let mut failed = 0;
        for (batch, size, result) in results {
            match result {
                Ok(_) => written += size as u64,
                Err(e) => {
                    failed += 1;
                    error!(batch, size, error = %e, "Folder index batch upsert failed");
                }
            }
        }
        (written, failed)
    }
}

/// Directory accumulator keyed on `(collection_id, full_path)`.
#[derive(Debug, Default)]
struct FolderTree {
    dirs: BTreeMap<(String, String), (path::AncestorDir, i64)>,
}

impl FolderTree {
    fn add(&mut self, record: &PathRecord) {
        let ancestors = path::ancestors(&record.path);
        let last = ancestors.len().saturating_sub(1);
        for (i, dir) in ancestors.into_iter().enumerate() {
            let key = (record.collection_id.clone(), dir.full_path.clone());
            let slot = self.dirs.entry(key).or_insert((dir, 0));
            if i == last {
                slot.1 += 1;
            }
        }
    }

    fn into_entries(self, build_id: Uuid, now: DateTime<Utc>) -> Vec<FolderIndexEntry> {
        self.dirs
            .into_iter()
            .map(|((collection_id, _), (dir, count))| FolderIndexEntry {
                collection_id,
                full_path: dir.full_path,
                parent_path: dir.parent_path,
                name: dir.name,
                depth: dir.depth as i32,
                direct_track_count: count,
                build_id,
                updated_at: now,
            })
            .collect()
    }
}

/// Derive folder entries for a set of records without touching any store.
pub fn derive_folders<'a>(
    records: impl IntoIterator<Item = &'a PathRecord>,
    build_id: Uuid,
) -> Vec<FolderIndexEntry> {
    let mut tree = FolderTree::default();
    for record in records {
        tree.add(record);
    }
    tree.into_entries(build_id, Utc::now())
}
