//! Background processing - work deferred off the request path.

mod notifications;

pub use notifications::notification_job_handler;
