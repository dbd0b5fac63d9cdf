//! Core type definitions used across the TrackHub workspace.

pub mod scan;

pub use scan::ScanRange;
