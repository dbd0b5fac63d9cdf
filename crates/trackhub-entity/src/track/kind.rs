//! Record kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation hint for a path record. Not structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "record_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A single playable audio file.
    Track,
    /// A file belonging to a pack (album-like folder grouping).
    Pack,
    /// A compressed bundle offered for download only.
    Archive,
}

/// Extensions treated as archives.
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z"];

impl RecordKind {
    /// Guess the kind from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Archive
        } else {
            Self::Track
        }
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Pack => "pack",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = trackhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "track" => Ok(Self::Track),
            "pack" => Ok(Self::Pack),
            "archive" => Ok(Self::Archive),
            _ => Err(trackhub_core::AppError::validation(format!(
                "Invalid record kind: '{s}'. Expected one of: track, pack, archive"
            ))),
        }
    }
}
