//! In-memory job queue.
//!
//! Jobs travel over an unbounded channel to a pool of worker tasks, so
//! enqueueing never waits on a worker. The number of waiting jobs is capped
//! by admission control instead: a slot is reserved atomically before the
//! job is sent and released when a worker picks it up.
//! Jobs are lost on server restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use blogger_core::ports::{Job, JobHandler, JobQueue, JobQueueError, JobResult, QueueStats};

/// In-memory job queue configuration.
#[derive(Debug, Clone)]
pub struct InMemoryJobQueueConfig {
    /// Maximum number of waiting jobs; 0 admits without limit.
    pub max_size: usize,
    /// Number of worker tasks.
    pub workers: usize,
    /// Delay before the first retry; grows linearly with each attempt.
    pub retry_delay: Duration,
}

impl Default for InMemoryJobQueueConfig {
    fn default() -> Self {
        Self {
            max_size: 10_000,
            workers: 4,
            retry_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Default)]
struct Counters {
    pending: AtomicUsize,
    processing: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    /// Reserve a pending slot. Never blocks; returns false when `limit` jobs already wait.
    fn admit(&self, limit: usize) -> bool {
        if limit == 0 {
            self.pending.fetch_add(1, Ordering::AcqRel);
            return true;
        }

        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |waiting| {
                (waiting < limit).then_some(waiting + 1)
            })
            .is_ok()
    }

    fn release(&self) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }

    fn snapshot(&self) -> QueueStats {
        QueueStats {
            pending: self.pending.load(Ordering::Acquire),
            processing: self.processing.load(Ordering::Acquire),
            completed: self.completed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
        }
    }
}

/// In-memory job queue.
pub struct InMemoryJobQueue {
    config: InMemoryJobQueueConfig,
    counters: Arc<Counters>,
    sender: mpsc::UnboundedSender<Job>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
}

impl InMemoryJobQueue {
    pub fn new(config: InMemoryJobQueueConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            config,
            counters: Arc::new(Counters::default()),
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: Job) -> Result<(), JobQueueError> {
        if !self.counters.admit(self.config.max_size) {
            tracing::warn!(job_type = %job.job_type, "Job queue full; job rejected");
            return Err(JobQueueError::QueueFull);
        }

        let job_id = job.id.clone();
        if let Err(e) = self.sender.send(job) {
            self.counters.release();
            return Err(JobQueueError::EnqueueError(e.to_string()));
        }

        tracing::debug!(job_id = %job_id, "Job enqueued");
        Ok(())
    }

    async fn start_worker(&self, handler: JobHandler) -> Result<(), JobQueueError> {
        let handler = Arc::new(handler);

        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                handler: handler.clone(),
                receiver: self.receiver.clone(),
                sender: self.sender.clone(),
                counters: self.counters.clone(),
                retry_delay: self.config.retry_delay,
            };
            tokio::spawn(worker.run());
        }

        tracing::info!(workers = self.config.workers, "Job workers started");
        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, JobQueueError> {
        Ok(self.counters.snapshot())
    }
}

struct Worker {
    id: usize,
    handler: Arc<JobHandler>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    sender: mpsc::UnboundedSender<Job>,
    counters: Arc<Counters>,
    retry_delay: Duration,
}

impl Worker {
    async fn run(self) {
        while let Some(job) = self.next().await {
            self.process(job).await;
        }
        tracing::debug!(worker = self.id, "Job worker stopped");
    }

    async fn next(&self) -> Option<Job> {
        let job = self.receiver.lock().await.recv().await?;
        self.counters.release();
        Some(job)
    }

    async fn process(&self, mut job: Job) {
        job.attempts += 1;
        self.counters.processing.fetch_add(1, Ordering::AcqRel);

        let result = (self.handler)(job.clone()).await;

        self.counters.processing.fetch_sub(1, Ordering::AcqRel);

        match result {
            JobResult::Success => {
                self.counters.completed.fetch_add(1, Ordering::AcqRel);
                tracing::debug!(worker = self.id, job_id = %job.id, "Job completed");
            }
            JobResult::Retry(reason) if job.attempts < job.max_attempts => {
                tracing::warn!(
                    job_id = %job.id,
                    attempt = job.attempts,
                    max_attempts = job.max_attempts,
                    reason = %reason,
                    "Job failed, retry scheduled"
                );
                self.schedule_retry(job);
            }
            JobResult::Retry(reason) | JobResult::Failed(reason) => {
                self.counters.failed.fetch_add(1, Ordering::AcqRel);
                tracing::error!(
                    job_id = %job.id,
                    job_type = %job.job_type,
                    attempts = job.attempts,
                    reason = %reason,
                    "Job abandoned"
                );
            }
        }
    }

    /// Re-send `job` after a linear backoff. Retries bypass the admission limit.
    fn schedule_retry(&self, job: Job) {
        let delay = self.retry_delay * job.attempts;
        let sender = self.sender.clone();
        let counters = self.counters.clone();

        counters.pending.fetch_add(1, Ordering::AcqRel);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(job).is_err() {
                counters.release();
                counters.failed.fetch_add(1, Ordering::AcqRel);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use blogger_core::ports::JobFuture;
    use tokio::time::timeout;

    use super::*;

    fn queue(max_size: usize, workers: usize) -> InMemoryJobQueue {
        InMemoryJobQueue::new(InMemoryJobQueueConfig {
            max_size,
            workers,
            retry_delay: Duration::from_millis(10),
        })
    }

    fn job() -> Job {
        Job::new("test", serde_json::json!({}))
    }

    fn counting_handler(seen: Arc<AtomicU32>, result: fn() -> JobResult) -> JobHandler {
        Box::new(move |_job: Job| -> JobFuture {
            let seen = seen.clone();
            Box::pin(async move {
                seen.fetch_add(1, Ordering::SeqCst);
                result()
            })
        })
    }

    async fn wait_for(queue: &InMemoryJobQueue, done: impl Fn(&QueueStats) -> bool) -> QueueStats {
        for _ in 0..200 {
            let stats = queue.stats().await.unwrap();
            if done(&stats) {
                return stats;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("queue did not settle in time");
    }

    #[tokio::test]
    async fn test_worker_processes_enqueued_jobs() {
        let queue = queue(10, 2);
        let seen = Arc::new(AtomicU32::new(0));
        queue
            .start_worker(counting_handler(seen.clone(), || JobResult::Success))
            .await
            .unwrap();

        for _ in 0..3 {
            queue.enqueue(job()).await.unwrap();
        }

        let stats = wait_for(&queue, |s| s.completed == 3).await;
        assert_eq!(stats.pending, 0);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_stops_at_max_attempts() {
        let queue = queue(10, 1);
        let attempts = Arc::new(AtomicU32::new(0));
        queue
            .start_worker(counting_handler(attempts.clone(), || {
                JobResult::Retry("unavailable".to_string())
            }))
            .await
            .unwrap();

        queue.enqueue(job().with_max_attempts(3)).await.unwrap();

        let stats = wait_for(&queue, |s| s.failed == 1).await;
        assert_eq!(stats.pending, 0);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let queue = queue(10, 1);
        let attempts = Arc::new(AtomicU32::new(0));
        queue
            .start_worker(counting_handler(attempts.clone(), || {
                JobResult::Failed("bad payload".to_string())
            }))
            .await
            .unwrap();

        queue.enqueue(job()).await.unwrap();

        wait_for(&queue, |s| s.failed == 1).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unlimited_queue_accepts_jobs_nobody_drains() {
        let queue = queue(0, 0);

        for n in 0..1_000 {
            timeout(Duration::from_secs(1), queue.enqueue(job()))
                .await
                .unwrap_or_else(|_| panic!("enqueue #{n} waited on a worker"))
                .unwrap();
        }

        assert_eq!(queue.stats().await.unwrap().pending, 1_000);
    }

    #[tokio::test]
    async fn test_full_queue_rejects_without_waiting() {
        let queue = queue(5, 0);

        for _ in 0..5 {
            queue.enqueue(job()).await.unwrap();
        }

        let err = timeout(Duration::from_secs(1), queue.enqueue(job()))
            .await
            .expect("enqueue on a full queue returned promptly")
            .unwrap_err();
        assert!(matches!(err, JobQueueError::QueueFull));
    }

    #[tokio::test]
    async fn test_concurrent_enqueues_never_overshoot_limit() {
        let queue = Arc::new(queue(10, 0));

        let results = futures::future::join_all((0..64).map(|_| {
            let queue = queue.clone();
            tokio::spawn(async move { queue.enqueue(job()).await })
        }))
        .await;

        let admitted = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(()))))
            .count();
        assert_eq!(admitted, 10);
        assert_eq!(queue.stats().await.unwrap().pending, 10);
    }
}
