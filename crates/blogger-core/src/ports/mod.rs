//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod job_queue;
mod notification;
mod repository;

pub use job_queue::{
    Job, JobFuture, JobHandler, JobQueue, JobQueueError, JobResult, QueueStats,
};
pub use notification::{Notifier, NotifyError};
pub use repository::BlogRepository;
