//! Convenience result type alias for TrackHub.

use crate::error::AppError;

/// A specialized `Result` type for TrackHub operations.
pub type AppResult<T> = Result<T, AppError>;
