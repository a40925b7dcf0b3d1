use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Blog;
use crate::error::DomainError;
use crate::mediator::{Request, RequestHandler};
use crate::ports::BlogRepository;

/// Query: fetch one blog by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlogByIdQuery {
    pub id: Uuid,
}

impl GetBlogByIdQuery {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Request for GetBlogByIdQuery {
    /// `None` when no blog has this id.
    type Response = Option<Blog>;

    const NAME: &'static str = "get_blog_by_id";
}

/// Read-only handler for [`GetBlogByIdQuery`].
pub struct GetBlogByIdHandler {
    blogs: Arc<dyn BlogRepository>,
}

impl GetBlogByIdHandler {
    pub fn new(blogs: Arc<dyn BlogRepository>) -> Self {
        Self { blogs }
    }
}

#[async_trait]
impl RequestHandler for GetBlogByIdHandler {
    type Request = GetBlogByIdQuery;

    async fn handle(&self, query: GetBlogByIdQuery) -> Result<Option<Blog>, DomainError> {
        let blog = self.blogs.find_by_id(query.id).await?;

        if blog.is_none() {
            tracing::debug!(blog_id = %query.id, "Blog not found");
        }

        Ok(blog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingBlogRepository, MemoryBlogRepository};

    #[tokio::test]
    async fn test_returns_stored_blog() {
        let repo = Arc::new(MemoryBlogRepository::default());
        let blog = repo
            .add(Blog::new("Hello".into(), "World".into()))
            .await
            .unwrap();

        let handler = GetBlogByIdHandler::new(repo);
        let found = handler.handle(GetBlogByIdQuery::new(blog.id)).await.unwrap();

        assert_eq!(found, Some(blog));
    }

    #[tokio::test]
    async fn test_unknown_id_is_none_not_an_error() {
        let handler = GetBlogByIdHandler::new(Arc::new(MemoryBlogRepository::default()));

        let found = handler
            .handle(GetBlogByIdQuery::new(Uuid::new_v4()))
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_storage_fault_propagates() {
        let handler = GetBlogByIdHandler::new(Arc::new(FailingBlogRepository));

        let err = handler
            .handle(GetBlogByIdQuery::new(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
    }
}
