//! # Blogger Infrastructure
//!
//! Concrete implementations of the ports defined in `blogger-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL blog storage via SeaORM
//! - `webhook` - Webhook notifications via reqwest

pub mod database;
pub mod jobs;
pub mod notification;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryBlogRepository};
pub use jobs::{InMemoryJobQueue, InMemoryJobQueueConfig};
pub use notification::LogNotifier;

#[cfg(feature = "postgres")]
pub use database::PostgresBlogRepository;

#[cfg(feature = "webhook")]
pub use notification::WebhookNotifier;
