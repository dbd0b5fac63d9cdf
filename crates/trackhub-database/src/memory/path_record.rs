//! In-memory path record store.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_entity::track::{CollectionSummary, NewPathRecord, PathRecord};

use crate::store::PathRecordStore;

/// Records keyed by `(collection_id, path)`.
type RecordMap = BTreeMap<(String, String), PathRecord>;

/// Path record store backed by a Tokio-guarded ordered map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPathRecordStore {
    records: Arc<RwLock<RecordMap>>,
}

impl MemoryPathRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn in_scope(record: &PathRecord, collection: Option<&str>) -> bool {
    collection.is_none_or(|c| record.collection_id == c)
}

#[async_trait]
impl PathRecordStore for MemoryPathRecordStore {
    async fn fetch_range(
        &self,
        collection: Option<&str>,
        range: ScanRange,
    ) -> AppResult<Vec<PathRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| in_scope(r, collection))
            .skip(range.offset as usize)
            .take(range.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_direct_children(
        &self,
        collection: Option<&str>,
        dir: &str,
    ) -> AppResult<Vec<PathRecord>> {
        let records = self.records.read().await;
        let mut found: Vec<PathRecord> = records
            .values()
            .filter(|r| in_scope(r, collection) && path::is_direct_child(dir, &r.path))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.collection_id.cmp(&b.collection_id))
        });
        Ok(found)
    }

    async fn first_path_from(
        &self,
        collection: Option<&str>,
        prefix: &str,
        from: Bound<&str>,
    ) -> AppResult<Option<String>> {
        let records = self.records.read().await;
        let above = |p: &str| match from {
            Bound::Included(low) => p >= low,
            Bound::Excluded(low) => p > low,
            Bound::Unbounded => true,
        };
        Ok(records
            .values()
            .filter(|r| in_scope(r, collection) && r.path.starts_with(prefix) && above(&r.path))
            .map(|r| r.path.as_str())
            .min()
            .map(str::to_string))
    }

    async fn search_by_name(
        &self,
        collection: Option<&str>,
        needle: &str,
        limit: u64,
    ) -> AppResult<Vec<PathRecord>> {
        let needle = needle.to_lowercase();
        let records = self.records.read().await;
        let mut found: Vec<PathRecord> = records
            .values()
            .filter(|r| in_scope(r, collection) && r.display_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.path.cmp(&b.path));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        let records = self.records.read().await;
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for record in records.values() {
            *totals.entry(record.collection_id.as_str()).or_default() += 1;
        }
        Ok(totals
            .into_iter()
            .map(|(collection_id, track_count)| CollectionSummary {
                collection_id: collection_id.to_string(),
                track_count,
            })
            .collect())
    }

    async fn upsert_batch(&self, batch: &[NewPathRecord]) -> AppResult<u64> {
        let mut records = self.records.write().await;
        for new in batch {
            let key = (new.collection_id.clone(), new.path.clone());
            match records.get_mut(&key) {
                Some(existing) => {
                    existing.display_name = new.display_name.clone();
                    existing.kind = new.kind;
                    existing.size_bytes = new.size_bytes.or(existing.size_bytes);
                    existing.format = new.format.clone();
                }
                None => {
                    records.insert(
                        key,
                        PathRecord {
                            id: Uuid::now_v7(),
                            collection_id: new.collection_id.clone(),
                            path: new.path.clone(),
                            display_name: new.display_name.clone(),
                            kind: new.kind,
                            size_bytes: new.size_bytes,
                            format: new.format.clone(),
                            created_at: Utc::now(),
                        },
                    );
                }
            }
        }
        Ok(batch.len() as u64)
    }
}
