use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod info;
pub mod metrics;
pub mod predict;

/// Build the API router. `/metrics` is attached separately by the binary,
/// since it needs the Prometheus handle.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    let protected = Router::new()
        .route("/predict", post(predict::predict))
        .route("/recommend", post(predict::recommend))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(info::index))
        .route("/api", get(info::welcome))
        .route("/health", get(health::health_check))
        .route("/config", get(info::config))
        .route("/model_info", get(info::model_info))
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
}
