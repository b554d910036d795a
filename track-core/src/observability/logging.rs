use crate::config::TelemetryConfig;
use opentelemetry::{KeyValue, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, runtime, trace as sdktrace};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn otlp_tracer(service_name: &str, endpoint: &str) -> Result<sdktrace::Tracer, TraceError> {
    let resource = Resource::new(vec![KeyValue::new(
        "service.name",
        service_name.to_string(),
    )]);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(sdktrace::config().with_resource(resource))
        .install_batch(runtime::Tokio)
}

/// Installs the global subscriber: env filter, JSON logs and, when an OTLP
/// endpoint is configured, span export.
///
/// An exporter that fails to start is logged and skipped; the dashboard
/// keeps serving with plain logs.
pub fn init_tracing(service_name: &str, telemetry: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));

    let (tracer, export_error) = match telemetry.otlp_endpoint.as_deref() {
        Some(endpoint) => match otlp_tracer(service_name, endpoint) {
            Ok(tracer) => (Some(tracer), None),
            Err(e) => (None, Some((endpoint, e))),
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracer.map(|t| tracing_opentelemetry::layer().with_tracer(t)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .init();

    if let Some((endpoint, error)) = export_error {
        tracing::warn!(
            service = service_name,
            endpoint,
            error = %error,
            "OTLP exporter unavailable, traces will not be exported"
        );
    }
}
