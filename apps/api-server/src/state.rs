//! Application state - built once at startup and shared across all handlers.

use std::sync::Arc;

use blogger_core::application::{CreateBlogHandler, GetBlogByIdHandler};
use blogger_core::ports::{BlogRepository, JobQueue, JobQueueError, Notifier};
use blogger_core::{DispatchError, Mediator};
use blogger_infra::{DatabaseConfig, InMemoryBlogRepository, InMemoryJobQueue, LogNotifier};

use crate::background;
use crate::config::AppConfig;

/// Faults that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Database unavailable: {0}")]
    Database(String),

    #[error("Dispatch configuration: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Job queue: {0}")]
    Jobs(#[from] JobQueueError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub blogs: Arc<dyn BlogRepository>,
    pub jobs: Arc<dyn JobQueue>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let blogs = blog_repository(config.database.as_ref()).await?;

        let jobs: Arc<dyn JobQueue> = Arc::new(InMemoryJobQueue::new(config.jobs.clone()));
        let notifier = notifier(config.notify_webhook_url.as_deref());
        jobs.start_worker(background::notification_job_handler(notifier))
            .await?;

        let state = Self::from_parts(blogs, jobs)?;

        tracing::info!("Application state initialized");

        Ok(state)
    }

    /// Wire handlers and the mediator around existing adapters.
    pub fn from_parts(
        blogs: Arc<dyn BlogRepository>,
        jobs: Arc<dyn JobQueue>,
    ) -> Result<Self, DispatchError> {
        let mediator = Mediator::builder()
            .register(GetBlogByIdHandler::new(blogs.clone()))
            .register(CreateBlogHandler::new(blogs.clone(), jobs.clone()))
            .build()?;

        Ok(Self {
            mediator: Arc::new(mediator),
            blogs,
            jobs,
        })
    }
}

#[cfg(feature = "postgres")]
async fn blog_repository(
    db_config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn BlogRepository>, StartupError> {
    use blogger_infra::PostgresBlogRepository;

    match db_config {
        Some(config) => {
            let conn = blogger_infra::database::connect(config)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            Ok(Arc::new(PostgresBlogRepository::new(conn)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            Ok(Arc::new(InMemoryBlogRepository::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn blog_repository(
    db_config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn BlogRepository>, StartupError> {
    if db_config.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repository");
    Ok(Arc::new(InMemoryBlogRepository::new()))
}

#[cfg(feature = "webhook")]
fn notifier(webhook_url: Option<&str>) -> Arc<dyn Notifier> {
    match webhook_url {
        Some(url) => {
            tracing::info!("Notification webhook configured");
            Arc::new(blogger_infra::WebhookNotifier::new(url.to_string()))
        }
        None => Arc::new(LogNotifier),
    }
}

#[cfg(not(feature = "webhook"))]
fn notifier(webhook_url: Option<&str>) -> Arc<dyn Notifier> {
    if webhook_url.is_some() {
        tracing::warn!("NOTIFY_WEBHOOK_URL ignored: built without webhook feature");
    }
    Arc::new(LogNotifier)
}
