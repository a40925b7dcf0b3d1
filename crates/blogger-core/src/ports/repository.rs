use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Blog;
use crate::error::RepoError;

/// Blog storage port.
///
/// An absent blog is `Ok(None)`, never an error; `Err` is reserved for
/// storage faults.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find a blog by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// Store a new blog and return the stored entity.
    ///
    /// Fails with [`RepoError::Constraint`] if a blog with the same id exists.
    async fn add(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// Number of stored blogs.
    async fn count(&self) -> Result<usize, RepoError>;
}
