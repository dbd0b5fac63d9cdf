//! # trackhub-entity
//!
//! Domain entity models for TrackHub. Database rows derive
//! `sqlx::FromRow`; everything derives `Serialize`/`Deserialize` so it can
//! cross the HTTP and CLI boundaries unchanged.

pub mod folder;
pub mod track;
