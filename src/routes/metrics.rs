//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

/// Register all custom metrics
fn register_metrics() {
    metrics::describe_counter!(
        "chatgate_requests_total",
        "Total number of chat dispatches by provider and outcome"
    );
    metrics::describe_histogram!(
        "chatgate_dispatch_duration_seconds",
        "Chat dispatch duration in seconds"
    );
    metrics::describe_counter!(
        "chatgate_search_requests_total",
        "Total number of video search requests"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a chat dispatch
pub fn record_dispatch(provider: &str, outcome: &str, duration_secs: f64) {
    metrics::counter!(
        "chatgate_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!("chatgate_dispatch_duration_seconds", "provider" => provider.to_string())
        .record(duration_secs);
}

/// Record a video search
pub fn record_search(result: &str) {
    metrics::counter!("chatgate_search_requests_total", "result" => result.to_string())
        .increment(1);
}
