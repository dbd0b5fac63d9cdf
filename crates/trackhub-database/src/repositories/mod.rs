//! PostgreSQL repository implementations of the store traits.

pub mod folder_index;
pub mod path_record;

pub use folder_index::FolderIndexRepository;
pub use path_record::PathRecordRepository;
