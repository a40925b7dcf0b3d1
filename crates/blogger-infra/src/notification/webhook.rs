//! Webhook notifier - posts new-blog announcements to a webhook URL (Slack, Discord, etc.).

use std::time::Duration;

use async_trait::async_trait;

use blogger_core::domain::BlogCreated;
use blogger_core::ports::{Notifier, NotifyError};

pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { url, client }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn blog_created(&self, event: &BlogCreated) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "text": format!("New blog: *{}* ({})", event.title, event.blog_id),
            "event": event,
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        tracing::debug!(blog_id = %event.blog_id, "Webhook notification delivered");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_webhook_is_a_delivery_error() {
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook".to_string());
        let event = BlogCreated {
            blog_id: uuid::Uuid::new_v4(),
            title: "Hello".to_string(),
            created_at: chrono::Utc::now(),
        };

        let err = notifier.blog_created(&event).await.unwrap_err();
        assert!(matches!(err, NotifyError::Delivery(_)));
    }
}
