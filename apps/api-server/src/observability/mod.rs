//! Observability module - request IDs on every span and response, plus
//! HTTP server metrics.

mod metrics;
mod request_id;

pub use metrics::record_http_metrics;
pub use request_id::{REQUEST_ID_HEADER, RequestId, propagate_request_id};
