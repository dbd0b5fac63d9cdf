//! Schema migrations for the record table and folder index.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use trackhub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration under `migrations/` that the database has not seen.
///
/// Both tables live in the same schema, so the folder index builder can
/// assume `path_records` exists once this returns.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(known = MIGRATOR.iter().count(), "Applying catalog schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Schema migration failed: {e}"), e)
    })?;

    info!("Catalog schema is up to date");
    Ok(())
}

/// Migrations not yet applied, as `"<version> <description>"`.
pub async fn pending_migrations(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let applied: Vec<i64> =
        match sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(pool)
            .await
        {
            Ok(versions) => versions,
            // Fresh database: the bookkeeping table does not exist yet.
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("42P01") => Vec::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to read applied migrations",
                    e,
                ));
            }
        };

    Ok(MIGRATOR
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .map(|m| format!("{} {}", m.version, m.description))
        .collect())
}
