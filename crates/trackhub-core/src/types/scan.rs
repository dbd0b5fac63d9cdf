//! Offset/limit windows for paginated store scans.

use serde::{Deserialize, Serialize};

/// Maximum rows a single scan page may request.
const MAX_SCAN_LIMIT: u64 = 10_000;

/// A window over a stably ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRange {
    /// Rows to skip.
    pub offset: u64,
    /// Rows to return.
    pub limit: u64,
}

impl ScanRange {
    /// First window of the given size.
    pub fn first(limit: u64) -> Self {
        Self {
            offset: 0,
            limit: limit.clamp(1, MAX_SCAN_LIMIT),
        }
    }

    /// The window immediately after this one.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }

    /// Whether a page of `fetched` rows means the scan is exhausted.
    pub fn is_last(&self, fetched: usize) -> bool {
        (fetched as u64) < self.limit
    }
}
