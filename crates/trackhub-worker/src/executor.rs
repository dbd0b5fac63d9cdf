//! In-process job dispatch for scheduled maintenance.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use trackhub_core::error::AppError;

/// One unit of work handed to a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Identifier used to correlate log lines.
    pub id: Uuid,
    /// Handler selector.
    pub job_type: String,
    /// Handler-specific arguments.
    pub payload: Value,
}

impl JobRequest {
    /// Create a job with a fresh id.
    pub fn new(job_type: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            job_type: job_type.into(),
            payload,
        }
    }
}

/// Runs one kind of background job.
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Value of [`JobRequest::job_type`] this handler accepts.
    fn job_type(&self) -> &str;

    /// Run the job. The returned value is a summary for the log.
    async fn execute(&self, job: &JobRequest) -> Result<Option<Value>, JobExecutionError>;
}

/// Why a job did not complete.
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Retrying with the same payload cannot succeed.
    #[error("job rejected: {0}")]
    Permanent(String),

    /// The next scheduled run may succeed (e.g. the record store was down).
    #[error("job failed, retry later: {0}")]
    Transient(String),

    #[error(transparent)]
    Internal(#[from] AppError),
}

impl JobExecutionError {
    /// Whether a later run of the same job might succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Permanent(_))
    }
}

/// Routes each [`JobRequest`] to the handler registered for its type.
#[derive(Debug, Default)]
pub struct JobExecutor {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. A later handler for the same type replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        debug!(%job_type, "Job handler registered");
        if self.handlers.insert(job_type.clone(), handler).is_some() {
            warn!(%job_type, "Replaced existing job handler");
        }
    }

    /// Run `job` on its handler, timing it for the log.
    pub async fn execute(&self, job: &JobRequest) -> Result<Option<Value>, JobExecutionError> {
        let Some(handler) = self.handlers.get(&job.job_type) else {
            return Err(JobExecutionError::Permanent(format!(
                "no handler for job type '{}'",
                job.job_type
            )));
        };

        let started = Instant::now();
        info!(job_id = %job.id, job_type = %job.job_type, "Job started");
        let outcome = handler.execute(job).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => info!(job_id = %job.id, elapsed_ms, "Job finished"),
            Err(e) => warn!(
                job_id = %job.id,
                elapsed_ms,
                retryable = e.is_retryable(),
                error = %e,
                "Job failed"
            ),
        }
        outcome
    }

    pub fn has_handler(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }

    /// Registered job types in name order.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }
}
