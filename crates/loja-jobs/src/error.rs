//! Job error types.

use loja_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur while running a background job.
#[derive(Error, Debug)]
pub enum JobError {
    /// The job's commerce operation failed outright.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The job body failed for some other reason.
    #[error("job execution failed: {0}")]
    Execution(String),
}
