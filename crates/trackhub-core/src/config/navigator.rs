//! Navigator, search and audit configuration.

use serde::{Deserialize, Serialize};

/// Presentation policy for directories holding both folders and files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedContentPolicyKind {
    /// Hide direct files whenever a subdirectory exists.
    #[default]
    FoldersWin,
    /// Show subdirectories first, then direct files.
    FoldersThenFiles,
}

/// Read-path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Mixed-content presentation policy.
    #[serde(default)]
    pub mixed_content: MixedContentPolicyKind,
    /// Case-insensitive substrings marking "collection" folders, which sort first.
    #[serde(default = "default_collection_markers")]
    pub collection_markers: Vec<String>,
    /// Upper bound on skip-scan probes for a single directory.
    #[serde(default = "default_skip_scan_limit")]
    pub skip_scan_limit: usize,
    /// Maximum search results returned.
    #[serde(default = "default_search_limit")]
    pub search_limit: u64,
    /// Queries shorter than this return nothing.
    #[serde(default = "default_search_min_len")]
    pub search_min_query_len: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            mixed_content: MixedContentPolicyKind::default(),
            collection_markers: default_collection_markers(),
            skip_scan_limit: default_skip_scan_limit(),
            search_limit: default_search_limit(),
            search_min_query_len: default_search_min_len(),
        }
    }
}

fn default_collection_markers() -> Vec<String> {
    vec!["COLLECTION".to_string()]
}

fn default_skip_scan_limit() -> usize {
    500
}

fn default_search_limit() -> u64 {
    100
}

fn default_search_min_len() -> usize {
    2
}
