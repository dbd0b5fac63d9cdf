//! In-memory store implementations.
//!
//! Suitable for single-node deployments and tests only: nothing survives a
//! restart. Ordering matches the PostgreSQL repositories (`COLLATE "C"`,
//! i.e. byte order).

pub mod folder_index;
pub mod path_record;

pub use folder_index::MemoryFolderIndexStore;
pub use path_record::MemoryPathRecordStore;
