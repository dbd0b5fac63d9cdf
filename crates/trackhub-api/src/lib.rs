//! # trackhub-api
//!
//! HTTP surface for TrackHub: directory browsing, search, collections and
//! folder index administration. Authentication and file streaming live
//! outside this service.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
