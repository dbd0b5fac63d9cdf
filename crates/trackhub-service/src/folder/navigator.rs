//! Hierarchical navigator over the folder index.
//!
//! A listing is two sequential reads: the child folders of the directory
//! from the folder index, then (only if the mixed-content policy asks for
//! them) the files directly inside it from the record store. Each call is
//! stateless given its path; navigation state lives in
//! [`NavigationState`](super::session::NavigationState).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use trackhub_core::config::NavigatorConfig;
use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_database::{FolderIndexStore, PathRecordStore};
use trackhub_entity::track::PathRecord;

use super::policy::{MixedContentPolicy, policy_for};
use super::sort::FolderComparator;
use crate::scope;

/// Contents of one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Normalized directory path.
    pub path: String,
    /// Child folder names in display order.
    pub folders: Vec<String>,
    /// Files directly inside the directory, ordered by path.
    pub files: Vec<PathRecord>,
}

impl Listing {
    /// Whether nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Read-only navigator.
#[derive(Debug, Clone)]
pub struct Navigator {
    records: Arc<dyn PathRecordStore>,
    folders: Arc<dyn FolderIndexStore>,
    comparator: FolderComparator,
    policy: Arc<dyn MixedContentPolicy>,
}

impl Navigator {
    /// Creates a navigator using the configured comparator markers and
    /// mixed-content policy.
    pub fn new(
        records: Arc<dyn PathRecordStore>,
        folders: Arc<dyn FolderIndexStore>,
        config: &NavigatorConfig,
    ) -> Self {
        Self {
            records,
            folders,
            comparator: FolderComparator::new(&config.collection_markers),
            policy: policy_for(config.mixed_content),
        }
    }

    /// Replace the mixed-content policy.
    pub fn with_policy(mut self, policy: Arc<dyn MixedContentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Active mixed-content policy.
    pub fn policy(&self) -> &dyn MixedContentPolicy {
        self.policy.as_ref()
    }

    /// List a directory across every collection.
    pub async fn list(&self, current_path: &str) -> AppResult<Listing> {
        self.list_scoped(None, current_path).await
    }

    /// List a directory, restricted to one collection when given.
    ///
    /// A directory without index entries is not an error: it simply has no
    /// folders, so its direct files are listed instead. Record store
    /// failures surface as `SourceUnavailable`.
    pub async fn list_scoped(
        &self,
        collection: Option<&str>,
        current_path: &str,
    ) -> AppResult<Listing> {
        let scope = scope::normalize(collection);
        let dir = path::normalize_dir(current_path);

        let folders = self.child_folders(scope, &dir).await?;

        let files = if self.policy.needs_files(&folders) {
            self.records
                .find_direct_children(scope, &dir)
                .await
                .map_err(|e| e.into_source_unavailable())?
        } else {
            Vec::new()
        };

        let visibility = self.policy.resolve(&folders, !files.is_empty());
        if !folders.is_empty() && !files.is_empty() {
            info!(
                path = %dir,
                folders = folders.len(),
                files = files.len(),
                policy = self.policy.name(),
                show_files = visibility.show_files,
                "Directory holds both folders and files"
            );
        }

        debug!(
            path = %dir,
            folders = folders.len(),
            files = files.len(),
            "Listed directory"
        );

        Ok(Listing {
            path: dir,
            folders: if visibility.show_folders { folders } else { Vec::new() },
            files: if visibility.show_files { files } else { Vec::new() },
        })
    }

    /// Sorted, de-duplicated child folder names of a normalized directory.
    pub async fn child_folders(&self, scope: Option<&str>, dir: &str) -> AppResult<Vec<String>> {
        let entries = self.folders.find_children(scope, dir).await?;
        let mut names: Vec<String> = entries.into_iter().map(|e| e.name).collect();
        self.comparator.sort(&mut names);
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use trackhub_database::memory::{MemoryFolderIndexStore, MemoryPathRecordStore};
    use trackhub_database::FolderIndexStore;
    use uuid::Uuid;

    use super::*;
    use crate::folder::builder::derive_folders;
    use crate::folder::policy::FoldersThenFiles;
    use crate::testing::{CountingRecords, UnavailableRecords, record, seed};

    async fn fixture(paths: &[(&str, &str)]) -> (Navigator, CountingRecords) {
        let inner = MemoryPathRecordStore::new();
        seed(&inner, paths).await;
        let records: Vec<PathRecord> = paths.iter().map(|(c, p)| record(c, p)).collect();
        let folders = MemoryFolderIndexStore::new();
        folders
            .upsert_batch(&derive_folders(&records, Uuid::now_v7()))
            .await
            .unwrap();
        let counting = CountingRecords::new(inner);
        let nav = Navigator::new(
            Arc::new(counting.clone()),
            Arc::new(folders),
            &NavigatorConfig::default(),
        );
        (nav, counting)
    }

    #[tokio::test]
    async fn test_folders_short_circuit_file_query() {
        let (nav, counting) = fixture(&[
            ("P", "/POOL/2025/JAN/track1.mp3"),
            ("P", "/POOL/2025/loose.mp3"),
        ])
        .await;
        let listing = nav.list("/POOL/2025/").await.unwrap();
        assert_eq!(listing.path, "/POOL/2025");
        assert_eq!(listing.folders, vec!["JAN"]);
        assert!(listing.files.is_empty());
        assert_eq!(counting.file_queries(), 0);
    }

    #[tokio::test]
    async fn test_leaf_lists_direct_files() {
        let (nav, counting) = fixture(&[
            ("P", "/POOL/2025/JAN/track2.mp3"),
            ("P", "/POOL/2025/JAN/track1.mp3"),
        ])
        .await;
        let listing = nav.list("/POOL/2025/JAN").await.unwrap();
        assert!(listing.folders.is_empty());
        let names: Vec<&str> = listing.files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["track1.mp3", "track2.mp3"]);
        assert_eq!(counting.file_queries(), 1);
    }

    #[tokio::test]
    async fn test_unknown_directory_is_empty_not_error() {
        let (nav, _) = fixture(&[("P", "/A/1.mp3")]).await;
        let listing = nav.list("/does/not/exist").await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn test_root_behaves_like_any_directory() {
        let (nav, _) = fixture(&[("X", "/B/1.mp3"), ("Y", "/A/2.mp3"), ("Y", "/A/3.mp3")]).await;
        let listing = nav.list("").await.unwrap();
        assert_eq!(listing.path, "/");
        assert_eq!(listing.folders, vec!["A", "B"]);

        let (files_only, _) = fixture(&[("X", "/loose.mp3")]).await;
        let listing = files_only.list("/").await.unwrap();
        assert_eq!(listing.files.len(), 1);
    }

    #[tokio::test]
    async fn test_unscoped_names_are_deduplicated() {
        let (nav, _) = fixture(&[
            ("X", "/shared/10/a.mp3"),
            ("Y", "/shared/10/b.mp3"),
            ("Y", "/shared/2/c.mp3"),
        ])
        .await;
        let listing = nav.list("/shared").await.unwrap();
        assert_eq!(listing.folders, vec!["2", "10"]);

        let scoped = nav.list_scoped(Some("X"), "/shared").await.unwrap();
        assert_eq!(scoped.folders, vec!["10"]);

        let blank = nav.list_scoped(Some(" "), "/shared").await.unwrap();
        assert_eq!(blank.folders, vec!["2", "10"]);
    }

    #[tokio::test]
    async fn test_folders_then_files_policy_shows_both() {
        let (nav, counting) = fixture(&[("P", "/A/B/1.mp3"), ("P", "/A/2.mp3")]).await;
        let nav = nav.with_policy(Arc::new(FoldersThenFiles));
        let listing = nav.list("/A").await.unwrap();
        assert_eq!(listing.folders, vec!["B"]);
        assert_eq!(listing.files.len(), 1);
        assert_eq!(counting.file_queries(), 1);
    }

    #[tokio::test]
    async fn test_record_store_failure_is_source_unavailable() {
        let nav = Navigator::new(
            Arc::new(UnavailableRecords),
            Arc::new(MemoryFolderIndexStore::new()),
            &NavigatorConfig::default(),
        );
        let err = nav.list("/A").await.unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
