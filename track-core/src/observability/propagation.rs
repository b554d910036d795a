//! Carries the current trace and request id onto outgoing backend calls,
//! using the W3C `traceparent`/`tracestate` headers.

use crate::middleware::REQUEST_ID_HEADER;
use opentelemetry::trace::TraceContextExt;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::RequestBuilder;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// Headers describing the active span plus the caller's request id.
///
/// Empty when there is no sampled OpenTelemetry span and no request id.
pub fn outgoing_headers(request_id: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();

    if span_context.is_valid() {
        let traceparent = format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        );
        if let Ok(value) = HeaderValue::from_str(&traceparent) {
            headers.insert(TRACEPARENT_HEADER, value);
        }

        let state = span_context.trace_state().header();
        if let Ok(value) = HeaderValue::from_str(&state)
            && !state.is_empty()
        {
            headers.insert(TRACESTATE_HEADER, value);
        }
    }

    if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    headers
}

/// Attaches [`outgoing_headers`] to a request before it is sent.
pub trait PropagateContext {
    fn propagate(self, request_id: Option<&str>) -> Self;
}

impl PropagateContext for RequestBuilder {
    fn propagate(self, request_id: Option<&str>) -> Self {
        self.headers(outgoing_headers(request_id))
    }
}
