//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blogger_infra::{DatabaseConfig, InMemoryJobQueueConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jobs: InMemoryJobQueueConfig,
    /// Webhook receiving "blog created" notifications; log-only when unset.
    pub notify_webhook_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let defaults = InMemoryJobQueueConfig::default();
        let jobs = InMemoryJobQueueConfig {
            max_size: parse_var("JOB_QUEUE_MAX_SIZE").unwrap_or(defaults.max_size),
            workers: parse_var("JOB_QUEUE_WORKERS").unwrap_or(defaults.workers),
            retry_delay: parse_var("JOB_RETRY_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            jobs,
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
