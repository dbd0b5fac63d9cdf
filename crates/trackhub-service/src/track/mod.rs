//! Catalog operations over path records.

pub mod catalog;
pub mod import;

pub use catalog::CatalogService;
pub use import::{ImportReport, ListingImporter};
