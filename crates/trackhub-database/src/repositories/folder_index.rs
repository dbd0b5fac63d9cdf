//! Folder index repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use trackhub_core::error::{AppError, ErrorKind};
use trackhub_core::result::AppResult;
use trackhub_entity::folder::FolderIndexEntry;

use crate::store::FolderIndexStore;

/// Repository for the `folder_index` table.
#[derive(Debug, Clone)]
pub struct FolderIndexRepository {
    pool: PgPool,
}

impl FolderIndexRepository {
    /// Create a new folder index repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderIndexStore for FolderIndexRepository {
    async fn upsert_batch(&self, entries: &[FolderIndexEntry]) -> AppResult<u64> {
        if entries.is_empty() {
            return Ok(0);
        }

        let collections: Vec<&str> = entries.iter().map(|e| e.collection_id.as_str()).collect();
        let full_paths: Vec<&str> = entries.iter().map(|e| e.full_path.as_str()).collect();
        let parents: Vec<&str> = entries.iter().map(|e| e.parent_path.as_str()).collect();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        let depths: Vec<i32> = entries.iter().map(|e| e.depth).collect();
        let counts: Vec<i64> = entries.iter().map(|e| e.direct_track_count).collect();
        let build_ids: Vec<Uuid> = entries.iter().map(|e| e.build_id).collect();
        let updated: Vec<DateTime<Utc>> = entries.iter().map(|e| e.updated_at).collect();

        let result = sqlx::query(
            "INSERT INTO folder_index \
                (collection_id, full_path, parent_path, name, depth, \
                 direct_track_count, build_id, updated_at) \
             SELECT * FROM UNNEST( \
                $1::text[], $2::text[], $3::text[], $4::text[], $5::int4[], \
                $6::int8[], $7::uuid[], $8::timestamptz[]) \
             ON CONFLICT (collection_id, full_path) DO UPDATE SET \
                parent_path = EXCLUDED.parent_path, \
                name = EXCLUDED.name, \
                depth = EXCLUDED.depth, \
                direct_track_count = EXCLUDED.direct_track_count, \
                build_id = EXCLUDED.build_id, \
                updated_at = EXCLUDED.updated_at \
             WHERE folder_index.build_id <= EXCLUDED.build_id",
        )
        .bind(&collections)
        .bind(&full_paths)
        .bind(&parents)
        .bind(&names)
        .bind(&depths)
        .bind(&counts)
        .bind(&build_ids)
        .bind(&updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert folder index batch", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn find_children(
        &self,
        collection: Option<&str>,
        parent_path: &str,
    ) -> AppResult<Vec<FolderIndexEntry>> {
        sqlx::query_as::<_, FolderIndexEntry>(
            "SELECT * FROM folder_index \
             WHERE parent_path = $2 AND ($1::text IS NULL OR collection_id = $1) \
             ORDER BY name COLLATE \"C\", collection_id",
        )
        .bind(collection)
        .bind(parent_path)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    async fn delete_stale(&self, collection: Option<&str>, build_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM folder_index \
             WHERE build_id < $2 AND ($1::text IS NULL OR collection_id = $1)",
        )
        .bind(collection)
        .bind(build_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to purge stale folders", e)
        })?;
        Ok(result.rows_affected())
    }

    async fn find_mixed(&self, collection: Option<&str>) -> AppResult<Vec<FolderIndexEntry>> {
        sqlx::query_as::<_, FolderIndexEntry>(
            "SELECT f.* FROM folder_index f \
             WHERE f.direct_track_count > 0 \
               AND ($1::text IS NULL OR f.collection_id = $1) \
               AND EXISTS ( \
                   SELECT 1 FROM folder_index c \
                   WHERE c.collection_id = f.collection_id AND c.parent_path = f.full_path) \
             ORDER BY f.full_path COLLATE \"C\", f.collection_id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find mixed folders", e))
    }

    async fn count(&self, collection: Option<&str>) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM folder_index WHERE ($1::text IS NULL OR collection_id = $1)",
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))?;
        Ok(count as u64)
    }
}
