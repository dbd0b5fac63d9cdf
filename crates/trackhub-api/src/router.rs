//! Route definitions for the TrackHub HTTP API.
//!
//! All routes are mounted under `/api`. Every route takes its arguments
//! from the query string because directory paths contain slashes.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router and thread `AppState` through every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(catalog_routes())
        .merge(admin_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Browsing, search and collections
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/collections", get(handlers::collections::list_collections))
        .route("/browse", get(handlers::browse::browse))
        .route("/search", get(handlers::search::search))
}

/// Folder index administration
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/folder-index/rebuild",
            post(handlers::admin::rebuild_folder_index),
        )
        .route(
            "/admin/folder-index/verify",
            get(handlers::admin::verify_folder_index),
        )
        .route(
            "/admin/folder-index/mixed",
            get(handlers::admin::mixed_content),
        )
}
