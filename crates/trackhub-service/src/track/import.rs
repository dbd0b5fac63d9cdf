//! Listing importer.
//!
//! Ingests a plain listing of absolute file paths into the record store.
//! The upsert key is `(collection_id, path)`, so re-running an import is
//! harmless. Rejected lines and failed batches are reported, not dropped.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use trackhub_core::error::AppError;
use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_database::PathRecordStore;
use trackhub_entity::track::NewPathRecord;

/// Outcome of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Distinct paths accepted for upsert.
    pub accepted: u64,
    /// Non-blank lines with no file segment.
    pub rejected: u64,
    /// Upsert batches that failed.
    pub failed_batches: u64,
    /// Records written.
    pub written: u64,
}

/// Batch importer for path listings.
#[derive(Debug, Clone)]
pub struct ListingImporter {
    records: Arc<dyn PathRecordStore>,
    chunk_size: usize,
}

impl ListingImporter {
    /// Creates a new importer writing `chunk_size` records per batch.
    pub fn new(records: Arc<dyn PathRecordStore>, chunk_size: usize) -> Self {
        Self {
            records,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Import `lines` into `collection`.
    ///
    /// Lines are percent-decoded and normalized; blank lines are skipped and
    /// duplicates collapse to one record.
    pub async fn import<I, S>(&self, collection: &str, lines: I) -> AppResult<ImportReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let collection = collection.trim();
        if collection.is_empty() {
            return Err(AppError::validation("Collection id is required"));
        }

        let mut report = ImportReport::default();
        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for (line_no, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match path::canonical_file_path(line) {
                Some(canonical) => {
                    if seen.insert(canonical.clone()) {
                        pending.push(NewPathRecord::from_path(collection, canonical));
                    }
                }
                None => {
                    report.rejected += 1;
                    warn!(line = line_no + 1, raw = line, "Rejected listing line");
                }
            }
        }
        report.accepted = pending.len() as u64;

        for (batch, chunk) in pending.chunks(self.chunk_size).enumerate() {
            match self.records.upsert_batch(chunk).await {
                Ok(n) => report.written += n,
                Err(e) => {
                    report.failed_batches += 1;
                    error!(batch, size = chunk.len(), error = %e, "Import batch failed");
                }
            }
        }

        info!(
            collection,
            accepted = report.accepted,
            rejected = report.rejected,
            written = report.written,
            failed_batches = report.failed_batches,
            "Listing import finished"
        );
        Ok(report)
    }
}
