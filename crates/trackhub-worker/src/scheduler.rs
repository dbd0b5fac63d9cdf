//! Cron scheduler for periodic folder index rebuilds.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use trackhub_core::error::AppError;

use crate::executor::{JobExecutor, JobRequest};
use crate::jobs::folder_index::FOLDER_INDEX_REBUILD;

/// Cron-based scheduler that runs jobs in-process
pub struct CronScheduler {
    scheduler: JobScheduler,
    executor: Arc<JobExecutor>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            executor,
        })
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Full folder index rebuild on `cron` (six-field, seconds first)
    pub async fn register_folder_index_rebuild(&self, cron: &str) -> Result<(), AppError> {
        let executor = Arc::clone(&self.executor);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            Box::pin(async move {
                let request = JobRequest::new(FOLDER_INDEX_REBUILD, serde_json::json!({}));
                match executor.execute(&request).await {
                    Ok(result) => tracing::info!(
                        job_id = %request.id,
                        result = ?result,
                        "Scheduled folder index rebuild finished"
                    ),
                    Err(e) => tracing::error!(
                        job_id = %request.id,
                        error = %e,
                        "Scheduled folder index rebuild failed"
                    ),
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid folder index rebuild schedule '{cron}': {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add folder index rebuild schedule: {e}"))
        })?;

        tracing::info!(cron, "Registered: folder_index_rebuild");
        Ok(())
    }
}
