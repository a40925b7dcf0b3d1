//! Notification port - informs the outside world about new blogs.

use async_trait::async_trait;

use crate::domain::BlogCreated;

/// Notifier trait - abstraction over notification channels (log, webhook, email).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce a newly created blog.
    async fn blog_created(&self, event: &BlogCreated) -> Result<(), NotifyError>;
}

/// Notification errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}
