//! Store selection.

use std::sync::Arc;

use tracing::info;

use trackhub_core::config::{DatabaseConfig, StoreProvider};
use trackhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryFolderIndexStore, MemoryPathRecordStore};
use crate::migration::run_migrations;
use crate::repositories::{FolderIndexRepository, PathRecordRepository};
use crate::store::{FolderIndexStore, PathRecordStore};

/// The record store and folder index a process works against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Source of truth.
    pub records: Arc<dyn PathRecordStore>,
    /// Derived directory cache.
    pub folders: Arc<dyn FolderIndexStore>,
}

impl Stores {
    /// Open the stores named by `config.provider`.
    ///
    /// PostgreSQL connections have pending migrations applied before use.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                run_migrations(db.pool()).await?;
                let pool = db.into_pool();
                info!("Using PostgreSQL record store and folder index");
                Ok(Self {
                    records: Arc::new(PathRecordRepository::new(pool.clone())),
                    folders: Arc::new(FolderIndexRepository::new(pool)),
                })
            }
            StoreProvider::Memory => {
                info!("Using in-memory record store and folder index");
                Ok(Self::memory())
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            records: Arc::new(MemoryPathRecordStore::new()),
            folders: Arc::new(MemoryFolderIndexStore::new()),
        }
    }
}
