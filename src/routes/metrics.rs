use axum::extract::State;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

/// Install the global Prometheus recorder and describe the service's metrics.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!("predictions_total", "Single predictions served");
    metrics::describe_counter!("recommendations_total", "Recommendation requests served");
    metrics::describe_counter!(
        "prediction_errors_total",
        "Prediction failures by kind (unknown_category, inference)"
    );
    metrics::describe_histogram!(
        "prediction_seconds",
        "Time to prepare features and run the model for one record"
    );

    Ok(handle)
}

/// `/metrics` route with its own state, ready to merge into the API router.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(Arc::new(handle))
}

/// Prometheus scrape endpoint, text exposition format.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> String {
    handle.render()
}
