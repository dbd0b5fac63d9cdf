//! Built-in job handler implementations.

pub mod folder_index;

pub use folder_index::FolderIndexJobHandler;
