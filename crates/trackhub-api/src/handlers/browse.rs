//! Directory browsing handler.

use axum::Json;
use axum::extract::{Query, State};

use trackhub_core::path;
use trackhub_service::NavigationState;

use crate::dto::request::BrowseQuery;
use crate::dto::response::{ApiResponse, BrowseResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/browse?path=&collection=
///
/// An empty directory is a successful, empty listing. Only an unreachable
/// store produces an error.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ApiResponse<BrowseResponse>>, ApiError> {
    let listing = state
        .navigator
        .list_scoped(query.collection.as_deref(), query.path.as_deref().unwrap_or("/"))
        .await?;

    let mut nav = NavigationState::new();
    nav.navigate_to(&listing.path);

    Ok(Json(ApiResponse::ok(BrowseResponse {
        parent: path::parent_of(&listing.path),
        breadcrumbs: nav.breadcrumbs(),
        path: listing.path,
        folders: listing.folders,
        files: listing.files,
    })))
}
