//! Path record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use trackhub_core::path;

use super::kind::RecordKind;

/// One file in the catalog. The ground truth the folder index derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PathRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Pool / collection namespace.
    pub collection_id: String,
    /// Absolute, decoded file path. Unique within the collection.
    pub path: String,
    /// Human-readable name.
    pub display_name: String,
    /// Presentation hint.
    pub kind: RecordKind,
    /// Size in bytes, when known.
    pub size_bytes: Option<i64>,
    /// Audio format hint (e.g. `mp3`).
    pub format: Option<String>,
    /// When the record was ingested.
    pub created_at: DateTime<Utc>,
}

impl PathRecord {
    /// Directory literally containing this file.
    pub fn directory(&self) -> String {
        path::parent_of(&self.path).unwrap_or_else(|| path::ROOT.to_string())
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        path::leaf_name(&self.path).unwrap_or(&self.path)
    }
}

/// Data required to insert or refresh a path record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPathRecord {
    /// Pool / collection namespace.
    pub collection_id: String,
    /// Canonical file path.
    pub path: String,
    /// Human-readable name.
    pub display_name: String,
    /// Presentation hint.
    pub kind: RecordKind,
    /// Size in bytes, when known.
    pub size_bytes: Option<i64>,
    /// Audio format hint.
    pub format: Option<String>,
}

impl NewPathRecord {
    /// Build a record from a canonical file path, deriving name, kind and
    /// format from the file name.
    pub fn from_path(collection_id: impl Into<String>, canonical_path: String) -> Self {
        let file_name = path::leaf_name(&canonical_path)
            .unwrap_or_default()
            .to_string();
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_lowercase())),
            _ => (file_name.clone(), None),
        };
        Self {
            collection_id: collection_id.into(),
            kind: RecordKind::from_file_name(&file_name),
            display_name: stem,
            format: ext,
            path: canonical_path,
            size_bytes: None,
        }
    }
}

/// Per-collection record totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CollectionSummary {
    /// Collection identifier.
    pub collection_id: String,
    /// Records in the collection.
    pub track_count: i64,
}
