//! Error type shared by every TrackHub crate.
//!
//! Stores, services and front ends all return [`AppError`]. The
//! [`ErrorKind`] decides how a failure is surfaced: an HTTP status, a CLI
//! exit message or a retry decision in the worker.

use std::fmt;
use thiserror::Error;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Caller input was rejected.
    Validation,
    /// Another operation holds the resource (e.g. a rebuild in progress).
    Conflict,
    /// Unexpected failure inside TrackHub itself.
    Internal,
    /// A query against the catalog database failed.
    Database,
    /// The path record store could not be read (network, auth, outage).
    SourceUnavailable,
    /// Settings could not be loaded or are invalid.
    Configuration,
    /// JSON encoding or decoding failed.
    Serialization,
    /// Local file or stream I/O failed.
    Io,
}

impl ErrorKind {
    /// Stable upper-case code used in logs and API payloads.
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::SourceUnavailable => "SOURCE_UNAVAILABLE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Io => "IO",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A categorized failure with a human-readable message.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category.
    pub kind: ErrorKind,
    /// Message safe to show to an operator.
    pub message: String,
    /// Underlying cause, if any.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Build an error without a cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Build an error wrapping `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SourceUnavailable, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Re-tag a store failure as [`ErrorKind::SourceUnavailable`], keeping
    /// the message and cause.
    pub fn into_source_unavailable(self) -> Self {
        Self {
            kind: ErrorKind::SourceUnavailable,
            ..self
        }
    }

    /// Whether the record store could not be reached.
    pub fn is_source_unavailable(&self) -> bool {
        self.kind == ErrorKind::SourceUnavailable
    }
}

// The boxed cause is not cloneable; clones keep kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O failure: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Cannot load settings: {err}"),
            err,
        )
    }
}
