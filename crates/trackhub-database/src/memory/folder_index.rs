//! In-memory folder index store.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use trackhub_core::result::AppResult;
use trackhub_entity::folder::FolderIndexEntry;

use crate::store::FolderIndexStore;

/// Folder index backed by a Tokio-guarded ordered map keyed on
/// `(collection_id, full_path)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderIndexStore {
    entries: Arc<RwLock<BTreeMap<(String, String), FolderIndexEntry>>>,
}

impl MemoryFolderIndexStore {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry, ordered by collection then path.
    pub async fn snapshot(&self) -> Vec<FolderIndexEntry> {
        self.entries.read().await.values().cloned().collect()
    }
}

fn in_scope(entry: &FolderIndexEntry, collection: Option<&str>) -> bool {
    collection.is_none_or(|c| entry.collection_id == c)
}

#[async_trait]
impl FolderIndexStore for MemoryFolderIndexStore {
    async fn upsert_batch(&self, batch: &[FolderIndexEntry]) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        let mut applied = 0;
        for entry in batch {
            let key = (entry.collection_id.clone(), entry.full_path.clone());
            if entries.get(&key).is_some_and(|e| e.build_id > entry.build_id) {
                continue;
            }
            entries.insert(key, entry.clone());
            applied += 1;
        }
        Ok(applied)
    }

    async fn find_children(
        &self,
        collection: Option<&str>,
        parent_path: &str,
    ) -> AppResult<Vec<FolderIndexEntry>> {
        let entries = self.entries.read().await;
        let mut children: Vec<FolderIndexEntry> = entries
            .values()
            .filter(|e| in_scope(e, collection) && e.parent_path == parent_path)
            .cloned()
            .collect();
        children.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.collection_id.cmp(&b.collection_id))
        });
        Ok(children)
    }

    async fn delete_stale(&self, collection: Option<&str>, build_id: Uuid) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| !in_scope(e, collection) || e.build_id >= build_id);
        Ok((before - entries.len()) as u64)
    }

    async fn find_mixed(&self, collection: Option<&str>) -> AppResult<Vec<FolderIndexEntry>> {
        let entries = self.entries.read().await;
        let parents: HashSet<(&str, &str)> = entries
            .values()
            .map(|e| (e.collection_id.as_str(), e.parent_path.as_str()))
            .collect();
        let mut mixed: Vec<FolderIndexEntry> = entries
            .values()
            .filter(|e| {
                in_scope(e, collection)
                    && e.direct_track_count > 0
                    && parents.contains(&(e.collection_id.as_str(), e.full_path.as_str()))
            })
            .cloned()
            .collect();
        mixed.sort_by(|a, b| {
            a.full_path
                .cmp(&b.full_path)
                .then_with(|| a.collection_id.cmp(&b.collection_id))
        });
        Ok(mixed)
    }

    async fn count(&self, collection: Option<&str>) -> AppResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|e| in_scope(e, collection)).count() as u64)
    }
}
