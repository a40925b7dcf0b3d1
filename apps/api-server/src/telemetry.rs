//! Telemetry initialization - structured logging and optional OTLP export
//! of traces and metrics.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name for tracing.
    pub service_name: String,
    /// OTLP collector endpoint; spans are exported only when set.
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "blogger-api".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            service_name: std::env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "blogger-api".to_string()),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Keeps the OTLP exporters alive; flushes pending spans and metrics when dropped.
pub struct TelemetryGuard {
    #[cfg(feature = "otel")]
    providers: Option<otlp::Providers>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        #[cfg(feature = "otel")]
        if let Some(providers) = self.providers.take() {
            providers.shutdown();
        }
    }
}

/// Initialize telemetry (logging and, with the `otel` feature, trace export).
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,api_server=debug,blogger_infra=debug,blogger_core=debug")
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    #[cfg(feature = "otel")]
    let (registry, providers, otel_error) = {
        use opentelemetry::trace::TracerProvider as _;

        let (providers, otel_error) = match config.otlp_endpoint.as_deref() {
            Some(endpoint) => match otlp::Providers::new(endpoint, &config.service_name) {
                Ok(providers) => (Some(providers), None),
                Err(e) => (None, Some(e)),
            },
            None => (None, None),
        };

        let layer = providers.as_ref().map(|p| {
            tracing_opentelemetry::layer()
                .with_tracer(p.tracer.tracer(config.service_name.clone()))
        });

        (registry.with(layer), providers, otel_error)
    };

    // Build and init subscriber based on log format
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }

    #[cfg(feature = "otel")]
    if let Some(e) = otel_error {
        tracing::warn!(error = %e, "OTLP exporter unavailable; telemetry stays local");
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        otlp = config.otlp_endpoint.is_some(),
        "Telemetry initialized"
    );

    TelemetryGuard {
        #[cfg(feature = "otel")]
        providers,
    }
}

#[cfg(feature = "otel")]
mod otlp {
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
    use opentelemetry_sdk::trace::TracerProvider;
    use opentelemetry_sdk::{Resource, runtime};

    pub type ExportError = Box<dyn std::error::Error + Send + Sync>;

    /// Trace and meter providers exporting to one OTLP/gRPC collector.
    pub struct Providers {
        pub tracer: TracerProvider,
        pub meter: SdkMeterProvider,
    }

    impl Providers {
        /// Build both providers and install the meter provider globally.
        pub fn new(endpoint: &str, service_name: &str) -> Result<Self, ExportError> {
            let resource = Resource::new(vec![KeyValue::new(
                "service.name",
                service_name.to_string(),
            )]);

            let span_exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()?;
            let tracer = TracerProvider::builder()
                .with_batch_exporter(span_exporter, runtime::Tokio)
                .with_resource(resource.clone())
                .build();

            let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()?;
            let meter = SdkMeterProvider::builder()
                .with_reader(PeriodicReader::builder(metric_exporter, runtime::Tokio).build())
                .with_resource(resource)
                .build();
            opentelemetry::global::set_meter_provider(meter.clone());

            Ok(Self { tracer, meter })
        }

        pub fn shutdown(self) {
            if let Err(e) = self.tracer.shutdown() {
                eprintln!("Failed to flush traces: {}", e);
            }
            if let Err(e) = self.meter.shutdown() {
                eprintln!("Failed to flush metrics: {}", e);
            }
        }
    }
}
