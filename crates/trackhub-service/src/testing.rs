//! Store doubles shared by the unit tests.

use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use trackhub_core::error::AppError;
use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_database::memory::{MemoryFolderIndexStore, MemoryPathRecordStore};
use trackhub_database::{FolderIndexStore, PathRecordStore};
use trackhub_entity::folder::FolderIndexEntry;
use trackhub_entity::track::{CollectionSummary, NewPathRecord, PathRecord, RecordKind};

pub fn record(collection: &str, path: &str) -> PathRecord {
    PathRecord {
        id: Uuid::now_v7(),
        collection_id: collection.into(),
        path: path.into(),
        display_name: path.rsplit('/').next().unwrap_or_default().into(),
        kind: RecordKind::Track,
        size_bytes: None,
        format: None,
        created_at: Utc::now(),
    }
}

pub async fn seed(store: &MemoryPathRecordStore, paths: &[(&str, &str)]) {
    let batch: Vec<NewPathRecord> = paths
        .iter()
        .map(|(c, p)| NewPathRecord::from_path(*c, p.to_string()))
        .collect();
    store.upsert_batch(&batch).await.unwrap();
}

/// Record store whose every call fails.
#[derive(Debug)]
pub struct UnavailableRecords;

fn down<T>() -> AppResult<T> {
    Err(AppError::database("connection refused"))
}

#[async_trait]
impl PathRecordStore for UnavailableRecords {
    async fn fetch_range(&self, _: Option<&str>, _: ScanRange) -> AppResult<Vec<PathRecord>> {
        down()
    }
    async fn find_direct_children(&self, _: Option<&str>, _: &str) -> AppResult<Vec<PathRecord>> {
        down()
    }
    async fn first_path_from(
        &self,
        _: Option<&str>,
        _: &str,
        _: Bound<&str>,
    ) -> AppResult<Option<String>> {
        down()
    }
    async fn search_by_name(
        &self,
        _: Option<&str>,
        _: &str,
        _: u64,
    ) -> AppResult<Vec<PathRecord>> {
        down()
    }
    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        down()
    }
    async fn upsert_batch(&self, _: &[NewPathRecord]) -> AppResult<u64> {
        down()
    }
}

/// Wraps a memory record store, counting direct-file queries and
/// optionally delaying them for one directory.
#[derive(Debug, Clone, Default)]
pub struct CountingRecords {
    pub inner: MemoryPathRecordStore,
    pub file_queries: Arc<AtomicUsize>,
    pub slow_dir: Option<(String, Duration)>,
}

impl CountingRecords {
    pub fn new(inner: MemoryPathRecordStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn slow_on(mut self, dir: &str, delay: Duration) -> Self {
        self.slow_dir = Some((dir.to_string(), delay));
        self
    }

    pub fn file_queries(&self) -> usize {
        self.file_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PathRecordStore for CountingRecords {
    async fn fetch_range(&self, c: Option<&str>, r: ScanRange) -> AppResult<Vec<PathRecord>> {
        self.inner.fetch_range(c, r).await
    }
    async fn find_direct_children(&self, c: Option<&str>, dir: &str) -> AppResult<Vec<PathRecord>> {
        self.file_queries.fetch_add(1, Ordering::SeqCst);
        if let Some((slow, delay)) = &self.slow_dir {
            if slow == dir {
                tokio::time::sleep(*delay).await;
            }
        }
        self.inner.find_direct_children(c, dir).await
    }
    async fn first_path_from(
        &self,
        c: Option<&str>,
        prefix: &str,
        from: Bound<&str>,
    ) -> AppResult<Option<String>> {
        self.inner.first_path_from(c, prefix, from).await
    }
    async fn search_by_name(
        &self,
        c: Option<&str>,
        needle: &str,
        limit: u64,
    ) -> AppResult<Vec<PathRecord>> {
        self.inner.search_by_name(c, needle, limit).await
    }
    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        self.inner.list_collections().await
    }
    async fn upsert_batch(&self, records: &[NewPathRecord]) -> AppResult<u64> {
        self.inner.upsert_batch(records).await
    }
}

/// Folder store that rejects any batch containing a given path.
#[derive(Debug, Clone)]
pub struct FlakyFolderStore {
    inner: MemoryFolderIndexStore,
    poison: String,
}

impl FlakyFolderStore {
    pub fn failing_when_contains(inner: MemoryFolderIndexStore, poison: &str) -> Self {
        Self {
            inner,
            poison: poison.into(),
        }
    }
}

#[async_trait]
impl FolderIndexStore for FlakyFolderStore {
    async fn upsert_batch(&self, entries: &[FolderIndexEntry]) -> AppResult<u64> {
        if entries.iter().any(|e| e.full_path == self.poison) {
            return Err(AppError::database("deadlock detected"));
        }
        self.inner.upsert_batch(entries).await
    }
    async fn find_children(&self, c: Option<&str>, p: &str) -> AppResult<Vec<FolderIndexEntry>> {
        self.inner.find_children(c, p).await
    }
    async fn delete_stale(&self, c: Option<&str>, build_id: Uuid) -> AppResult<u64> {
        self.inner.delete_stale(c, build_id).await
    }
    async fn find_mixed(&self, c: Option<&str>) -> AppResult<Vec<FolderIndexEntry>> {
        self.inner.find_mixed(c).await
    }
    async fn count(&self, c: Option<&str>) -> AppResult<u64> {
        self.inner.count(c).await
    }
}

/// Folder store whose stale purge stalls, widening the window between a
/// run's writes and its purge.
#[derive(Debug, Clone)]
pub struct SlowPurgeFolders {
    inner: MemoryFolderIndexStore,
    delay: Duration,
}

impl SlowPurgeFolders {
    pub fn new(inner: MemoryFolderIndexStore, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl FolderIndexStore for SlowPurgeFolders {
    async fn upsert_batch(&self, entries: &[FolderIndexEntry]) -> AppResult<u64> {
        self.inner.upsert_batch(entries).await
    }
    async fn find_children(&self, c: Option<&str>, p: &str) -> AppResult<Vec<FolderIndexEntry>> {
        self.inner.find_children(c, p).await
    }
    async fn delete_stale(&self, c: Option<&str>, build_id: Uuid) -> AppResult<u64> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete_stale(c, build_id).await
    }
    async fn find_mixed(&self, c: Option<&str>) -> AppResult<Vec<FolderIndexEntry>> {
        self.inner.find_mixed(c).await
    }
    async fn count(&self, c: Option<&str>) -> AppResult<u64> {
        self.inner.count(c).await
    }
}
