//! # trackhub-core
//!
//! Core crate for TrackHub. Contains configuration schemas, canonical
//! path handling, scan windows, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TrackHub crates.

pub mod config;
pub mod error;
pub mod path;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
