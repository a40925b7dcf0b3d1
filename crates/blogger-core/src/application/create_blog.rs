use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Blog, BlogCreated};
use crate::error::DomainError;
use crate::mediator::{Request, RequestHandler};
use crate::ports::{BlogRepository, Job, JobQueue};

/// Command: create a new blog.
///
/// Only constructible through [`CreateBlogCommand::new`], so a command that
/// reaches the handler always has a non-blank title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBlogCommand {
    title: String,
    content: String,
}

impl CreateBlogCommand {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Request for CreateBlogCommand {
    type Response = Blog;

    const NAME: &'static str = "create_blog";
}

/// Persists new blogs and queues the "blog created" notification.
pub struct CreateBlogHandler {
    blogs: Arc<dyn BlogRepository>,
    jobs: Arc<dyn JobQueue>,
}

impl CreateBlogHandler {
    pub fn new(blogs: Arc<dyn BlogRepository>, jobs: Arc<dyn JobQueue>) -> Self {
        Self { blogs, jobs }
    }

    /// Queue the notification job. Failures are logged, never returned.
    async fn announce(&self, blog: &Blog) {
        let event = BlogCreated::from(blog);
        let queued = match Job::for_event(BlogCreated::JOB_TYPE, &event) {
            Ok(job) => self.jobs.enqueue(job).await,
            Err(e) => Err(e),
        };

        if let Err(e) = queued {
            tracing::warn!(blog_id = %blog.id, error = %e, "Failed to queue blog notification");
        }
    }
}

#[async_trait]
impl RequestHandler for CreateBlogHandler {
    type Request = CreateBlogCommand;

    async fn handle(&self, command: CreateBlogCommand) -> Result<Blog, DomainError> {
        let blog = Blog::new(command.title, command.content);
        let saved = self.blogs.add(blog).await?;

        tracing::info!(blog_id = %saved.id, "Blog created");

        self.announce(&saved).await;

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FailingBlogRepository, FailingJobQueue, MemoryBlogRepository, RecordingJobQueue,
    };

    #[test]
    fn test_blank_fields_are_rejected() {
        assert!(matches!(
            CreateBlogCommand::new("", "World"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            CreateBlogCommand::new("Hello", "   "),
            Err(DomainError::Validation(_))
        ));
        assert!(CreateBlogCommand::new("Hello", "World").is_ok());
    }

    #[tokio::test]
    async fn test_create_persists_and_queues_notification() {
        let repo = Arc::new(MemoryBlogRepository::default());
        let jobs = Arc::new(RecordingJobQueue::default());
        let handler = CreateBlogHandler::new(repo.clone(), jobs.clone());

        let blog = handler
            .handle(CreateBlogCommand::new("Hello", "World").unwrap())
            .await
            .unwrap();

        assert_eq!(blog.title, "Hello");
        assert_eq!(blog.content, "World");
        assert_eq!(repo.find_by_id(blog.id).await.unwrap(), Some(blog.clone()));

        let queued = jobs.jobs();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].job_type, BlogCreated::JOB_TYPE);
        let event: BlogCreated = queued[0].decode().unwrap();
        assert_eq!(event.blog_id, blog.id);
    }

    #[tokio::test]
    async fn test_storage_fault_surfaces_and_queues_nothing() {
        let jobs = Arc::new(RecordingJobQueue::default());
        let handler = CreateBlogHandler::new(Arc::new(FailingBlogRepository), jobs.clone());

        let err = handler
            .handle(CreateBlogCommand::new("Hello", "World").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(jobs.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_queue_failure_does_not_fail_the_command() {
        let repo = Arc::new(MemoryBlogRepository::default());
        let handler = CreateBlogHandler::new(repo.clone(), Arc::new(FailingJobQueue));

        let blog = handler
            .handle(CreateBlogCommand::new("Hello", "World").unwrap())
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_by_id(blog.id).await.unwrap(), Some(blog));
    }
}
