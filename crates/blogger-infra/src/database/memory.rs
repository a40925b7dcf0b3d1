//! In-memory blog repository - used when no database is configured.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogger_core::domain::Blog;
use blogger_core::error::RepoError;
use blogger_core::ports::BlogRepository;

/// Blog repository backed by a HashMap behind an async RwLock.
///
/// Writers hold the write lock for the whole check-and-insert, so concurrent
/// adds are serialized and readers only ever see complete records.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn add(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;

        match store.entry(blog.id) {
            Entry::Occupied(_) => Err(RepoError::Constraint(format!(
                "blog {} already exists",
                blog.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(blog.clone());
                tracing::debug!(blog_id = %blog.id, "Blog stored in memory");
                Ok(blog)
            }
        }
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.store.read().await.len())
    }
}
