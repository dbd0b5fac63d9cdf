//! Index audits.
//!
//! The skip-scan walks the record store directly: starting from a
//! directory prefix it asks for the first path above a lower bound, records
//! the child folder that path lies in, then moves the bound to the folder's
//! next sibling (`name` + `'0'`, the byte after `'/'`). Each probe
//! discovers one child folder, so enumerating a directory costs one query
//! per child rather than a scan of every file beneath it.

use std::collections::BTreeSet;
use std::ops::Bound;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_database::{FolderIndexStore, PathRecordStore};
use trackhub_entity::folder::FolderIndexEntry;

use crate::scope;

/// Child folder names found by a skip-scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipScan {
    /// Names in byte order.
    pub names: Vec<String>,
    /// The probe limit was reached before the directory was exhausted.
    pub truncated: bool,
}

/// Index versus record store for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAudit {
    pub path: String,
    /// Child folder names known to the index.
    pub indexed: Vec<String>,
    /// Child folder names implied by the records.
    pub scanned: Vec<String>,
    /// Folders the records imply but the index lacks.
    pub missing_from_index: Vec<String>,
    /// Folders the index lists but no record implies. Left empty when the
    /// scan was truncated.
    pub unknown_to_source: Vec<String>,
    pub truncated: bool,
}

impl IndexAudit {
    /// Whether the index matches the records for this directory.
    pub fn is_consistent(&self) -> bool {
        self.missing_from_index.is_empty() && self.unknown_to_source.is_empty()
    }
}

/// Read-only checks of the folder index against the record store.
#[derive(Debug, Clone)]
pub struct FolderIndexAuditor {
    records: Arc<dyn PathRecordStore>,
    folders: Arc<dyn FolderIndexStore>,
    probe_limit: usize,
}

impl FolderIndexAuditor {
    /// Creates a new auditor. `probe_limit` caps record store queries per
    /// skip-scan.
    pub fn new(
        records: Arc<dyn PathRecordStore>,
        folders: Arc<dyn FolderIndexStore>,
        probe_limit: usize,
    ) -> Self {
        Self {
            records,
            folders,
            probe_limit: probe_limit.max(1),
        }
    }

    /// Enumerate the child folders of `dir` from the record store alone.
    pub async fn skip_scan(&self, collection: Option<&str>, dir: &str) -> AppResult<SkipScan> {
        let scope = scope::normalize(collection);
        let prefix = path::child_prefix(&path::normalize_dir(dir));
        let mut names = BTreeSet::new();
        let mut from: Bound<String> = Bound::Unbounded;

        for _ in 0..self.probe_limit {
            let next = self
                .records
                .first_path_from(scope, &prefix, from.as_ref().map(String::as_str))
                .await
                .map_err(|e| e.into_source_unavailable())?;
            let Some(next) = next else {
                return Ok(SkipScan {
                    names: names.into_iter().collect(),
                    truncated: false,
                });
            };

            let rest = &next[prefix.len()..];
            match rest.split_once('/') {
                Some((name, _)) => {
                    from = Bound::Included(format!("{prefix}{name}0"));
                    names.insert(name.to_string());
                }
                None => from = Bound::Excluded(next),
            }
        }

        warn!(
            prefix = %prefix,
            probes = self.probe_limit,
            "Skip-scan stopped at probe limit"
        );
        Ok(SkipScan {
            names: names.into_iter().collect(),
            truncated: true,
        })
    }

    /// Compare the index's children of `dir` with a skip-scan of the records.
    pub async fn verify(&self, collection: Option<&str>, dir: &str) -> AppResult<IndexAudit> {
        let scope = scope::normalize(collection);
        let dir = path::normalize_dir(dir);

        let indexed: BTreeSet<String> = self
            .folders
            .find_children(scope, &dir)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();
        let scan = self.skip_scan(scope, &dir).await?;
        let scanned: BTreeSet<String> = scan.names.into_iter().collect();

        let missing_from_index: Vec<String> = scanned.difference(&indexed).cloned().collect();
        let unknown_to_source: Vec<String> = if scan.truncated {
            Vec::new()
        } else {
            indexed.difference(&scanned).cloned().collect()
        };

        if !missing_from_index.is_empty() {
            warn!(
                path = %dir,
                missing = missing_from_index.len(),
                "Folder index is missing directories"
            );
        }
        info!(
            path = %dir,
            indexed = indexed.len(),
            scanned = scanned.len(),
            truncated = scan.truncated,
            "Folder index audit complete"
        );

        Ok(IndexAudit {
            path: dir,
            indexed: indexed.into_iter().collect(),
            scanned: scanned.into_iter().collect(),
            missing_from_index,
            unknown_to_source,
            truncated: scan.truncated,
        })
    }

    /// Indexed directories that have both child folders and direct tracks.
    /// Under the `folders_win` policy these tracks are never listed.
    pub async fn mixed_content(
        &self,
        collection: Option<&str>,
    ) -> AppResult<Vec<FolderIndexEntry>> {
        self.folders.find_mixed(scope::normalize(collection)).await
    }
}

#[cfg(test)]
mod tests {
    use trackhub_database::memory::{MemoryFolderIndexStore, MemoryPathRecordStore};
    use uuid::Uuid;

    use super::*;
    use crate::folder::builder::derive_folders;
    use crate::testing::{UnavailableRecords, record, seed};

    async fn auditor(
        paths: &[(&str, &str)],
        indexed: &[(&str, &str)],
        limit: usize,
    ) -> FolderIndexAuditor {
        let records = MemoryPathRecordStore::new();
        seed(&records, paths).await;
        let folders = MemoryFolderIndexStore::new();
        let entries: Vec<_> = indexed.iter().map(|(c, p)| record(c, p)).collect();
        folders
            .upsert_batch(&derive_folders(&entries, Uuid::now_v7()))
            .await
            .unwrap();
        FolderIndexAuditor::new(Arc::new(records), Arc::new(folders), limit)
    }

    const TREE: &[(&str, &str)] = &[
        ("P", "/D/01/a.mp3"),
        ("P", "/D/01/b.mp3"),
        ("P", "/D/01/deep/c.mp3"),
        ("P", "/D/02/d.mp3"),
        ("P", "/D/loose.mp3"),
        ("P", "/D/zz/e.mp3"),
        ("P", "/D!/x.mp3"),
    ];

    #[tokio::test]
    async fn test_skip_scan_finds_children_once() {
        let auditor = auditor(TREE, &[], 50).await;
        let scan = auditor.skip_scan(None, "/D").await.unwrap();
        assert_eq!(scan.names, vec!["01", "02", "zz"]);
        assert!(!scan.truncated);

        let root = auditor.skip_scan(None, "/").await.unwrap();
        assert_eq!(root.names, vec!["D", "D!"]);
    }

    #[tokio::test]
    async fn test_skip_scan_jumps_whole_folder_on_high_code_points() {
        let paths = [
            ("P", "/D/01/a.mp3"),
            ("P", "/D/01/\u{10FFFF}x.mp3"),
            ("P", "/D/01/\u{10FFFF}\u{10FFFF}/y.mp3"),
            ("P", "/D/010/c.mp3"),
            ("P", "/D/02/b.mp3"),
        ];
        let auditor = auditor(&paths, &[], 4).await;
        let scan = auditor.skip_scan(None, "/D").await.unwrap();
        assert_eq!(scan.names, vec!["01", "010", "02"]);
        assert!(!scan.truncated);
    }

    #[tokio::test]
    async fn test_skip_scan_truncates_at_limit() {
        let auditor = auditor(TREE, &[], 2).await;
        let scan = auditor.skip_scan(None, "/D").await.unwrap();
        assert!(scan.truncated);
        assert_eq!(scan.names, vec!["01", "02"]);
    }

    #[tokio::test]
    async fn test_verify_reports_missing_and_unknown() {
        let indexed = [("P", "/D/01/a.mp3"), ("P", "/D/old/x.mp3")];
        let auditor = auditor(TREE, &indexed, 50).await;
        let audit = auditor.verify(Some("P"), "/D/").await.unwrap();
        assert_eq!(audit.path, "/D");
        assert_eq!(audit.indexed, vec!["01", "old"]);
        assert_eq!(audit.missing_from_index, vec!["02", "zz"]);
        assert_eq!(audit.unknown_to_source, vec!["old"]);
        assert!(!audit.is_consistent());
    }

    #[tokio::test]
    async fn test_verify_consistent_index() {
        let auditor = auditor(TREE, TREE, 50).await;
        let audit = auditor.verify(None, "/D").await.unwrap();
        assert!(audit.is_consistent());
    }

    #[tokio::test]
    async fn test_mixed_content_report() {
        let auditor = auditor(TREE, TREE, 50).await;
        let mixed = auditor.mixed_content(None).await.unwrap();
        let paths: Vec<&str> = mixed.iter().map(|e| e.full_path.as_str()).collect();
        assert_eq!(paths, vec!["/D", "/D/01"]);
    }

    #[tokio::test]
    async fn test_source_failure() {
        let auditor = FolderIndexAuditor::new(
            Arc::new(UnavailableRecords),
            Arc::new(MemoryFolderIndexStore::new()),
            10,
        );
        let err = auditor.skip_scan(None, "/").await.unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
