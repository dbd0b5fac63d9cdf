//! # trackhub-database
//!
//! Store traits for path records and the folder index, their PostgreSQL
//! repositories, in-memory implementations for single-node use, and
//! connection/migration management.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{FolderIndexStore, PathRecordStore};
pub use stores::Stores;
