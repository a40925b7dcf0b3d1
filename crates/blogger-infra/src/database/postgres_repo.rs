//! PostgreSQL blog repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, SqlErr};
use uuid::Uuid;

use blogger_core::domain::Blog;
use blogger_core::error::RepoError;
use blogger_core::ports::BlogRepository;

use super::entity::blog::{ActiveModel, Entity as BlogEntity};

/// PostgreSQL blog repository.
///
/// Expects the `blogs` table from `sql/001_create_blogs.sql`.
pub struct PostgresBlogRepository {
    db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn repo_error(e: DbErr) -> RepoError {
    if let Some(violation) = e.sql_err().and_then(constraint_violation) {
        return violation;
    }

    match &e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        _ => RepoError::Query(e.to_string()),
    }
}

pub(crate) fn constraint_violation(e: SqlErr) -> Option<RepoError> {
    match e {
        SqlErr::UniqueConstraintViolation(detail) => Some(RepoError::Constraint(detail)),
        _ => None,
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let result = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn add(&self, blog: Blog) -> Result<Blog, RepoError> {
        let id = blog.id;
        let model = ActiveModel::from(blog)
            .insert(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(blog_id = %id, "Blog inserted");

        Ok(model.into())
    }

    async fn count(&self) -> Result<usize, RepoError> {
        let total = BlogEntity::find()
            .count(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(total as usize)
    }
}
