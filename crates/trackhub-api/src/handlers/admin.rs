//! Folder index administration handlers.

use axum::Json;
use axum::extract::{Query, State};

use trackhub_entity::folder::FolderIndexEntry;
use trackhub_service::{BuildReport, IndexAudit};

use crate::dto::request::IndexScopeQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/folder-index/rebuild?collection=
///
/// Runs the rebuild inline and returns its report. A request arriving while
/// any rebuild on this server is running (including the scheduled one) is
/// rejected with 409.
pub async fn rebuild_folder_index(
    State(state): State<AppState>,
    Query(query): Query<IndexScopeQuery>,
) -> Result<Json<ApiResponse<BuildReport>>, ApiError> {
    let report = state
        .builder
        .try_build_index(query.collection.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/admin/folder-index/verify?path=&collection=
pub async fn verify_folder_index(
    State(state): State<AppState>,
    Query(query): Query<IndexScopeQuery>,
) -> Result<Json<ApiResponse<IndexAudit>>, ApiError> {
    let audit = state
        .auditor
        .verify(query.collection.as_deref(), query.path.as_deref().unwrap_or("/"))
        .await?;
    Ok(Json(ApiResponse::ok(audit)))
}

/// GET /api/admin/folder-index/mixed?collection=
pub async fn mixed_content(
    State(state): State<AppState>,
    Query(query): Query<IndexScopeQuery>,
) -> Result<Json<ApiResponse<Vec<FolderIndexEntry>>>, ApiError> {
    let entries = state
        .auditor
        .mixed_content(query.collection.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}
