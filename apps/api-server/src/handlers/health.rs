//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use blogger_core::ports::QueueStats;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blogs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationQueue>,
}

/// Backlog of the "blog created" notification queue.
#[derive(Serialize, ToSchema)]
pub struct NotificationQueue {
    pub pending: usize,
    pub processing: usize,
    pub delivered: usize,
    pub failed: usize,
}

impl From<QueueStats> for NotificationQueue {
    fn from(stats: QueueStats) -> Self {
        Self {
            pending: stats.pending,
            processing: stats.processing,
            delivered: stats.completed,
            failed: stats.failed,
        }
    }
}

/// Health check endpoint - returns server status.
///
/// `degraded` when storage does not answer; queue backlog is informational.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let blogs = match state.blogs.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach storage");
            None
        }
    };

    let notifications = match state.jobs.stats().await {
        Ok(stats) => Some(NotificationQueue::from(stats)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read queue stats");
            None
        }
    };

    let response = HealthResponse {
        status: if blogs.is_some() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        blogs,
        notifications,
    };

    HttpResponse::Ok().json(response)
}
