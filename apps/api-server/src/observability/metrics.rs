//! HTTP server metrics recorded through the OpenTelemetry API.
//!
//! Instruments come from the global meter provider. Without the `otel`
//! feature (or without an OTLP endpoint) that provider is a no-op.

use std::sync::LazyLock;
use std::time::Instant;

use actix_web::Error;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram};

struct HttpMetrics {
    requests: Counter<u64>,
    duration: Histogram<f64>,
}

static HTTP_METRICS: LazyLock<HttpMetrics> = LazyLock::new(|| {
    let meter = opentelemetry::global::meter("api-server");
    HttpMetrics {
        requests: meter
            .u64_counter("http.server.requests")
            .with_description("HTTP requests served")
            .build(),
        duration: meter
            .f64_histogram("http.server.request.duration")
            .with_description("Time to produce the response")
            .with_unit("s")
            .build(),
    }
});

/// Middleware: counts each request and records its latency, labelled by
/// method, matched route and status code.
///
/// Install with `actix_web::middleware::from_fn(record_http_metrics)`.
pub async fn record_http_metrics(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let started = Instant::now();
    let method = req.method().to_string();

    let res = next.call(req).await?;

    // Route templates keep label cardinality bounded; unmatched paths share one label.
    let route = res
        .request()
        .match_pattern()
        .unwrap_or_else(|| "unmatched".to_string());
    let attributes = [
        KeyValue::new("http.request.method", method),
        KeyValue::new("http.route", route),
        KeyValue::new("http.response.status_code", i64::from(res.status().as_u16())),
    ];

    HTTP_METRICS.requests.add(1, &attributes);
    HTTP_METRICS
        .duration
        .record(started.elapsed().as_secs_f64(), &attributes);

    Ok(res)
}
