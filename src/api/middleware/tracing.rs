//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request span and response log at `INFO`, latency in milliseconds.
///
/// Rejected bearer tokens show up here only as their status; the reason is
/// logged by the authentication coordinator inside the same span:
///
/// ```text
/// INFO request{method=GET uri=/api/me version=HTTP/1.1}: finished processing request latency=1 ms status=401
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
