//! Fire-and-forget background jobs.
//!
//! The only asynchronous unit of work in the system is the bulk discount
//! update. [`JobQueue::submit`] returns an opaque handle synchronously and
//! runs the job out-of-band on the tokio blocking pool; there is no ordering
//! guarantee relative to concurrent API requests, no deadline and no retry.
//! Job outcomes are observable only through the status map.

mod discount;
mod error;
mod queue;

pub use discount::queue_discount_update;
pub use error::JobError;
pub use queue::{JobHandle, JobId, JobQueue, JobStatus};
