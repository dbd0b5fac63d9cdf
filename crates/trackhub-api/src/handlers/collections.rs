//! Collections handler.

use axum::Json;
use axum::extract::State;

use trackhub_entity::track::CollectionSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/collections
pub async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CollectionSummary>>>, ApiError> {
    let collections = state.catalog.list_collections().await?;
    Ok(Json(ApiResponse::ok(collections)))
}
