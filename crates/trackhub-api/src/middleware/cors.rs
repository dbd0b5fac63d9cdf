//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use trackhub_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration. The API is read-mostly,
/// so only `GET`, `POST` and `OPTIONS` are allowed.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = if config.allows_any() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
