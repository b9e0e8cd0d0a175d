//! Prometheus metrics endpoint

use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state for the metrics endpoint.
#[derive(Clone)]
pub struct MetricsAppState {
    pub handle: PrometheusHandle,
}

/// Render the Prometheus exposition text.
pub async fn render_metrics(State(state): State<MetricsAppState>) -> String {
    state.handle.render()
}
