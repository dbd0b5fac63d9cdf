//! Mixed-content presentation strategies.
//!
//! A directory can hold both subdirectories and files of its own. The
//! folder index always counts those files; what the navigator shows is up
//! to the active [`MixedContentPolicy`].

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use trackhub_core::config::MixedContentPolicyKind;

/// What a listing should expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentVisibility {
    /// Include child folders.
    pub show_folders: bool,
    /// Include direct files.
    pub show_files: bool,
}

/// Decides which parts of a directory listing are shown.
pub trait MixedContentPolicy: Send + Sync + Debug + 'static {
    /// Stable identifier used in logs and config.
    fn name(&self) -> &'static str;

    /// Whether the direct-file query is needed once the child folders are
    /// known. Returning `false` lets the navigator skip that query.
    fn needs_files(&self, folders: &[String]) -> bool;

    /// Final visibility for a directory.
    fn resolve(&self, folders: &[String], has_direct_files: bool) -> ContentVisibility;
}

/// Files are hidden whenever the directory has at least one subdirectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldersWin;

impl MixedContentPolicy for FoldersWin {
    fn name(&self) -> &'static str {
        "folders_win"
    }

    fn needs_files(&self, folders: &[String]) -> bool {
        folders.is_empty()
    }

    fn resolve(&self, folders: &[String], _has_direct_files: bool) -> ContentVisibility {
        ContentVisibility {
            show_folders: !folders.is_empty(),
            show_files: folders.is_empty(),
        }
    }
}

/// Subdirectories first, then the directory's own files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldersThenFiles;

impl MixedContentPolicy for FoldersThenFiles {
    fn name(&self) -> &'static str {
        "folders_then_files"
    }

    fn needs_files(&self, _folders: &[String]) -> bool {
        true
    }

    fn resolve(&self, folders: &[String], has_direct_files: bool) -> ContentVisibility {
        ContentVisibility {
            show_folders: !folders.is_empty(),
            show_files: has_direct_files,
        }
    }
}

/// Strategy for a configured policy kind.
pub fn policy_for(kind: MixedContentPolicyKind) -> Arc<dyn MixedContentPolicy> {
    match kind {
        MixedContentPolicyKind::FoldersWin => Arc::new(FoldersWin),
        MixedContentPolicyKind::FoldersThenFiles => Arc::new(FoldersThenFiles),
    }
}
