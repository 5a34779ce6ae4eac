//! Job queue and status tracking.

use crate::error::JobError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use uuid::Uuid;

/// Opaque job identifier returned to the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Accepted, not yet started.
    Queued,
    /// Currently executing.
    Running,
    /// Finished with a summary message.
    Completed(String),
    /// Failed; the error is recorded, nothing is retried.
    Failed(String),
}

/// Handle returned synchronously on submission. The invoker has no further
/// interaction with the job beyond this id.
#[derive(Debug, Clone, Copy)]
pub struct JobHandle {
    /// The job's opaque id.
    pub id: JobId,
}

/// Queue that executes jobs out-of-band on the tokio blocking pool.
///
/// Must be used from within a tokio runtime. Statuses are kept for the
/// lifetime of the queue; there is no eviction at this scale.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    statuses: Arc<Mutex<HashMap<JobId, JobStatus>>>,
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a job for execution. Returns immediately with its handle.
    pub fn submit<F>(&self, name: &str, job: F) -> JobHandle
    where
        F: FnOnce() -> Result<String, JobError> + Send + 'static,
    {
        let id = JobId::generate();
        self.set_status(id, JobStatus::Queued);

        let statuses = Arc::clone(&self.statuses);
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            Self::store(&statuses, id, JobStatus::Running);
            info!(job_id = %id, job = %name, "job started");
            match job() {
                Ok(message) => {
                    info!(job_id = %id, job = %name, %message, "job completed");
                    Self::store(&statuses, id, JobStatus::Completed(message));
                }
                Err(e) => {
                    error!(job_id = %id, job = %name, error = %e, "job failed");
                    Self::store(&statuses, id, JobStatus::Failed(e.to_string()));
                }
            }
        });

        JobHandle { id }
    }

    /// Look up the status of a job.
    pub fn status(&self, id: &JobId) -> Option<JobStatus> {
        match self.statuses.lock() {
            Ok(guard) => guard.get(id).cloned(),
            Err(poisoned) => poisoned.into_inner().get(id).cloned(),
        }
    }

    fn set_status(&self, id: JobId, status: JobStatus) {
        Self::store(&self.statuses, id, status);
    }

    fn store(statuses: &Mutex<HashMap<JobId, JobStatus>>, id: JobId, status: JobStatus) {
        match statuses.lock() {
            Ok(mut guard) => {
                guard.insert(id, status);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(id, status);
            }
        }
    }
}
