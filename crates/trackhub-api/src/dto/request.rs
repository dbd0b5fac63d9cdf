//! Query string DTOs.

use serde::Deserialize;

/// `GET /api/browse`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseQuery {
    /// Directory to list; the root when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// Restrict to one collection.
    #[serde(default)]
    pub collection: Option<String>,
}

/// `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Admin endpoints scoped to an optional collection and path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexScopeQuery {
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}
