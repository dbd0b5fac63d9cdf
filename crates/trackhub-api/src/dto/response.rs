//! Response DTOs.

use serde::{Deserialize, Serialize};

use trackhub_entity::track::PathRecord;
use trackhub_service::folder::Breadcrumb;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Active mixed-content policy.
    pub policy: String,
}

/// One directory listing with navigation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    /// Normalized directory path.
    pub path: String,
    /// Parent directory; absent at the root.
    pub parent: Option<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub folders: Vec<String>,
    pub files: Vec<PathRecord>,
}

/// Search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub items: Vec<PathRecord>,
}
