//! Folder index rebuild job.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use trackhub_service::FolderIndexBuilder;

use crate::executor::{JobExecutionError, JobHandler, JobRequest};

/// Job type handled by [`FolderIndexJobHandler`].
pub const FOLDER_INDEX_REBUILD: &str = "folder_index_rebuild";

/// Rebuilds the folder index. Payload: `{"collection": "<id>"}`, or no
/// collection to rebuild everything.
#[derive(Debug)]
pub struct FolderIndexJobHandler {
    builder: Arc<FolderIndexBuilder>,
}

impl FolderIndexJobHandler {
    /// Create a new folder index job handler
    pub fn new(builder: Arc<FolderIndexBuilder>) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl JobHandler for FolderIndexJobHandler {
    fn job_type(&self) -> &str {
        FOLDER_INDEX_REBUILD
    }

    async fn execute(&self, job: &JobRequest) -> Result<Option<Value>, JobExecutionError> {
        let collection = match job.payload.get("collection") {
            None | Some(Value::Null) => None,
            Some(Value::String(c)) => Some(c.as_str()),
            Some(other) => {
                return Err(JobExecutionError::Permanent(format!(
                    "Invalid collection in payload: {other}"
                )));
            }
        };

        let report = self.builder.build_index(collection).await.map_err(|e| {
            if e.is_source_unavailable() {
                JobExecutionError::Transient(e.to_string())
            } else {
                JobExecutionError::Internal(e)
            }
        })?;

        if !report.is_complete() {
            tracing::warn!(
                job_id = %job.id,
                failed_batches = report.failed_batches,
                "Folder index rebuild finished with failed batches"
            );
        }

        let value = serde_json::to_value(&report)
            .map_err(|e| JobExecutionError::Internal(e.into()))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use trackhub_core::config::IndexerConfig;
    use trackhub_database::{FolderIndexStore, PathRecordStore, Stores};
    use trackhub_entity::track::NewPathRecord;

    use super::*;

    #[tokio::test]
    async fn test_rebuild_job_reports() {
        let stores = Stores::memory();
        stores
            .records
            .upsert_batch(&[NewPathRecord::from_path("P", "/A/B/t.mp3".into())])
            .await
            .unwrap();
        let builder = FolderIndexBuilder::new(
            stores.records.clone(),
            stores.folders.clone(),
            IndexerConfig::default(),
        );
        let handler = FolderIndexJobHandler::new(Arc::new(builder));

        let out = handler
            .execute(&JobRequest::new(FOLDER_INDEX_REBUILD, serde_json::json!({"collection": "P"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out["folders_written"], 2);
        assert_eq!(stores.folders.count(None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_bad_payload_is_permanent() {
        let stores = Stores::memory();
        let builder =
            FolderIndexBuilder::new(stores.records, stores.folders, IndexerConfig::default());
        let handler = FolderIndexJobHandler::new(Arc::new(builder));
        let err = handler
            .execute(&JobRequest::new(FOLDER_INDEX_REBUILD, serde_json::json!({"collection": 7})))
            .await
            .unwrap_err();
        assert!(matches!(err, JobExecutionError::Permanent(_)));
    }
}
