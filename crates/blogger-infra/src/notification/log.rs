//! Log notifier - writes notifications to the tracing output.

use async_trait::async_trait;

use blogger_core::domain::BlogCreated;
use blogger_core::ports::{Notifier, NotifyError};

/// Notifier used when no delivery channel is configured.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn blog_created(&self, event: &BlogCreated) -> Result<(), NotifyError> {
        tracing::info!(
            blog_id = %event.blog_id,
            title = %event.title,
            created_at = %event.created_at,
            "New blog published"
        );
        Ok(())
    }
}
