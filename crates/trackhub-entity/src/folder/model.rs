//! Folder index entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One directory implied by the record paths of a collection.
///
/// Derived and rebuildable; never edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderIndexEntry {
    /// Collection whose records imply this directory.
    pub collection_id: String,
    /// Absolute directory path.
    pub full_path: String,
    /// Containing directory (`/` for top-level directories).
    pub parent_path: String,
    /// Last path segment.
    pub name: String,
    /// Number of segments in `full_path`.
    pub depth: i32,
    /// Records whose containing directory is exactly `full_path`.
    pub direct_track_count: i64,
    /// Rebuild run that last wrote this row.
    pub build_id: Uuid,
    /// When this row was last written.
    pub updated_at: DateTime<Utc>,
}
