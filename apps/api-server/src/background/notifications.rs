//! Delivers "blog created" notifications queued by the create command.

use std::sync::Arc;

use blogger_core::domain::BlogCreated;
use blogger_core::ports::{Job, JobFuture, JobHandler, JobResult, Notifier};

/// Job handler that forwards `blog.created` jobs to `notifier`.
///
/// Delivery failures are retried by the queue; malformed jobs are dropped.
pub fn notification_job_handler(notifier: Arc<dyn Notifier>) -> JobHandler {
    Box::new(move |job: Job| -> JobFuture {
        let notifier = notifier.clone();
        Box::pin(async move {
            if job.job_type != BlogCreated::JOB_TYPE {
                return JobResult::Failed(format!("unknown job type `{}`", job.job_type));
            }

            let event: BlogCreated = match job.decode() {
                Ok(event) => event,
                Err(e) => return JobResult::Failed(format!("invalid payload: {}", e)),
            };

            match notifier.blog_created(&event).await {
                Ok(()) => JobResult::Success,
                Err(e) => {
                    tracing::warn!(blog_id = %event.blog_id, error = %e, "Notification failed");
                    JobResult::Retry(e.to_string())
                }
            }
        })
    })
}
