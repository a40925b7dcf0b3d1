//! Hand-written port doubles for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Blog;
use crate::error::RepoError;
use crate::ports::{BlogRepository, Job, JobHandler, JobQueue, JobQueueError, QueueStats};

#[derive(Default)]
pub struct MemoryBlogRepository {
    blogs: Mutex<HashMap<Uuid, Blog>>,
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.blogs.lock().unwrap().get(&id).cloned())
    }

    async fn add(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.blogs.lock().unwrap().insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.blogs.lock().unwrap().len())
    }
}

pub struct FailingBlogRepository;

#[async_trait]
impl BlogRepository for FailingBlogRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Connection("storage offline".to_string()))
    }

    async fn add(&self, _blog: Blog) -> Result<Blog, RepoError> {
        Err(RepoError::Connection("storage offline".to_string()))
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Err(RepoError::Connection("storage offline".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingJobQueue {
    jobs: Mutex<Vec<Job>>,
}

impl RecordingJobQueue {
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobQueue for RecordingJobQueue {
    async fn enqueue(&self, job: Job) -> Result<(), JobQueueError> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }

    async fn start_worker(&self, _handler: JobHandler) -> Result<(), JobQueueError> {
        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, JobQueueError> {
        Ok(QueueStats {
            pending: self.jobs.lock().unwrap().len(),
            ..QueueStats::default()
        })
    }
}

pub struct FailingJobQueue;

#[async_trait]
impl JobQueue for FailingJobQueue {
    async fn enqueue(&self, _job: Job) -> Result<(), JobQueueError> {
        Err(JobQueueError::QueueFull)
    }

    async fn start_worker(&self, _handler: JobHandler) -> Result<(), JobQueueError> {
        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, JobQueueError> {
        Ok(QueueStats::default())
    }
}
