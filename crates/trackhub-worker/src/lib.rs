//! Background job processing for TrackHub.
//!
//! This crate provides:
//! - A job executor that dispatches jobs to the correct handler
//! - A cron scheduler that triggers periodic folder index rebuilds
//! - The folder index rebuild job

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler, JobRequest};
pub use scheduler::CronScheduler;
