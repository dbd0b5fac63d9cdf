//! Path record repository implementation.

use std::ops::Bound;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trackhub_core::error::{AppError, ErrorKind};
use trackhub_core::path;
use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_entity::track::{CollectionSummary, NewPathRecord, PathRecord};

use crate::store::PathRecordStore;

/// Repository for the `path_records` table.
#[derive(Debug, Clone)]
pub struct PathRecordRepository {
    pool: PgPool,
}

impl PathRecordRepository {
    /// Create a new path record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PathRecordStore for PathRecordRepository {
    async fn fetch_range(
        &self,
        collection: Option<&str>,
        range: ScanRange,
    ) -> AppResult<Vec<PathRecord>> {
        sqlx::query_as::<_, PathRecord>(
            "SELECT * FROM path_records \
             WHERE ($1::text IS NULL OR collection_id = $1) \
             ORDER BY collection_id COLLATE \"C\", path COLLATE \"C\" \
             LIMIT $2 OFFSET $3",
        )
        .bind(collection)
        .bind(range.limit as i64)
        .bind(range.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to scan path records", e))
    }

    async fn find_direct_children(
        &self,
        collection: Option<&str>,
        dir: &str,
    ) -> AppResult<Vec<PathRecord>> {
        let prefix = path::child_prefix(dir);
        sqlx::query_as::<_, PathRecord>(
            "SELECT * FROM path_records \
             WHERE ($1::text IS NULL OR collection_id = $1) \
               AND starts_with(path, $2) \
               AND char_length(path) > char_length($2) \
               AND strpos(substr(path, char_length($2) + 1), '/') = 0 \
             ORDER BY path COLLATE \"C\", collection_id",
        )
        .bind(collection)
        .bind(&prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list directory files", e)
        })
    }

    async fn first_path_from(
        &self,
        collection: Option<&str>,
        prefix: &str,
        from: Bound<&str>,
    ) -> AppResult<Option<String>> {
        let (low, inclusive) = match from {
            Bound::Included(low) => (Some(low), true),
            Bound::Excluded(low) => (Some(low), false),
            Bound::Unbounded => (None, false),
        };
        sqlx::query_scalar::<_, String>(
            "SELECT path FROM path_records \
             WHERE ($1::text IS NULL OR collection_id = $1) \
               AND starts_with(path, $2) \
               AND ($3::text IS NULL \
                    OR path COLLATE \"C\" > $3 COLLATE \"C\" \
                    OR ($4 AND path = $3)) \
             ORDER BY path COLLATE \"C\" \
             LIMIT 1",
        )
        .bind(collection)
        .bind(prefix)
        .bind(low)
        .bind(inclusive)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to probe next path", e))
    }

    async fn search_by_name(
        &self,
        collection: Option<&str>,
        needle: &str,
        limit: u64,
    ) -> AppResult<Vec<PathRecord>> {
        let pattern = format!("%{}%", escape_like(needle));
        sqlx::query_as::<_, PathRecord>(
            "SELECT * FROM path_records \
             WHERE ($1::text IS NULL OR collection_id = $1) \
               AND display_name ILIKE $2 ESCAPE '\\' \
             ORDER BY path COLLATE \"C\" \
             LIMIT $3",
        )
        .bind(collection)
        .bind(&pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search records", e))
    }

    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        sqlx::query_as::<_, CollectionSummary>(
            "SELECT collection_id, COUNT(*) AS track_count FROM path_records \
             GROUP BY collection_id ORDER BY collection_id COLLATE \"C\"",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list collections", e))
    }

    async fn upsert_batch(&self, records: &[NewPathRecord]) -> AppResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = records.iter().map(|_| Uuid::now_v7()).collect();
        let collections: Vec<&str> = records.iter().map(|r| r.collection_id.as_str()).collect();
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        let names: Vec<&str> = records.iter().map(|r| r.display_name.as_str()).collect();
        let kinds: Vec<&str> = records.iter().map(|r| r.kind.as_str()).collect();
        let sizes: Vec<Option<i64>> = records.iter().map(|r| r.size_bytes).collect();
        let formats: Vec<Option<&str>> = records.iter().map(|r| r.format.as_deref()).collect();

        let result = sqlx::query(
            "INSERT INTO path_records \
                (id, collection_id, path, display_name, kind, size_bytes, format) \
             SELECT * FROM UNNEST( \
                $1::uuid[], $2::text[], $3::text[], $4::text[], \
                $5::text[]::record_kind[], $6::int8[], $7::text[]) \
             ON CONFLICT (collection_id, path) DO UPDATE SET \
                display_name = EXCLUDED.display_name, \
                kind = EXCLUDED.kind, \
                size_bytes = COALESCE(EXCLUDED.size_bytes, path_records.size_bytes), \
                format = EXCLUDED.format",
        )
        .bind(&ids)
        .bind(&collections)
        .bind(&paths)
        .bind(&names)
        .bind(&kinds)
        .bind(&sizes)
        .bind(&formats)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert records", e))?;

        Ok(result.rows_affected())
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
