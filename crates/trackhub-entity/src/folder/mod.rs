//! Derived folder index entities.

pub mod model;

pub use model::FolderIndexEntry;
