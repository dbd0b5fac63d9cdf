//! Track search handler.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::SearchQuery;
use crate::dto::response::{ApiResponse, SearchResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/search?q=&collection=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let items = state
        .catalog
        .search(&query.q, query.collection.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(SearchResponse {
        query: query.q.trim().to_string(),
        total: items.len(),
        items,
    })))
}
