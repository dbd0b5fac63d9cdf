//! Store traits for the record table and the derived folder index.
//!
//! Both traits are object safe so services can hold them as
//! `Arc<dyn ...>` and tests can substitute counting or failing doubles.
//! `collection` arguments of `None` mean "every collection".

use std::ops::Bound;

use async_trait::async_trait;
use uuid::Uuid;

use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_entity::folder::FolderIndexEntry;
use trackhub_entity::track::{CollectionSummary, NewPathRecord, PathRecord};

/// The source of truth: one row per file.
#[async_trait]
pub trait PathRecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read one window of records ordered by `(collection_id, path)` in
    /// byte order.
    async fn fetch_range(
        &self,
        collection: Option<&str>,
        range: ScanRange,
    ) -> AppResult<Vec<PathRecord>>;

    /// Records whose containing directory is exactly `dir`, ordered by path.
    async fn find_direct_children(
        &self,
        collection: Option<&str>,
        dir: &str,
    ) -> AppResult<Vec<PathRecord>>;

    /// Smallest record path starting with `prefix` within the lower bound
    /// `from`, in byte order.
    async fn first_path_from(
        &self,
        collection: Option<&str>,
        prefix: &str,
        from: Bound<&str>,
    ) -> AppResult<Option<String>>;

    /// Case-insensitive substring match on display names, ordered by path.
    async fn search_by_name(
        &self,
        collection: Option<&str>,
        needle: &str,
        limit: u64,
    ) -> AppResult<Vec<PathRecord>>;

    /// Record totals per collection, ordered by collection id.
    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>>;

    /// Insert or refresh records keyed on `(collection_id, path)`.
    /// The batch must not contain the same key twice.
    async fn upsert_batch(&self, records: &[NewPathRecord]) -> AppResult<u64>;
}

/// The derived directory cache. Only the index builder writes to it.
#[async_trait]
pub trait FolderIndexStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert or overwrite entries keyed on `(collection_id, full_path)`.
    /// A row already stamped with a newer `build_id` is kept as is. Returns
    /// the number of rows written.
    async fn upsert_batch(&self, entries: &[FolderIndexEntry]) -> AppResult<u64>;

    /// Entries whose `parent_path` equals `parent_path`.
    async fn find_children(
        &self,
        collection: Option<&str>,
        parent_path: &str,
    ) -> AppResult<Vec<FolderIndexEntry>>;

    /// Delete entries in scope stamped with a build older than `build_id`.
    /// Build ids are UUID v7, so byte order is start-time order.
    async fn delete_stale(&self, collection: Option<&str>, build_id: Uuid) -> AppResult<u64>;

    /// Entries with direct tracks that also have at least one child entry.
    async fn find_mixed(&self, collection: Option<&str>) -> AppResult<Vec<FolderIndexEntry>>;

    /// Number of entries in scope.
    async fn count(&self, collection: Option<&str>) -> AppResult<u64>;
}
