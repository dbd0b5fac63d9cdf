//! Path record (track, pack, archive) entities.

pub mod kind;
pub mod model;

pub use kind::RecordKind;
pub use model::{CollectionSummary, NewPathRecord, PathRecord};
