use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub items: Vec<String>,
    pub areas: Vec<String>,
    pub metadata: serde_json::Value,
}

/// GET / — browser UI (embedded at compile time).
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /api
pub async fn welcome() -> Json<WelcomeResponse> {
    tracing::info!("Welcome endpoint called");
    Json(WelcomeResponse {
        message: "Welcome to the crop yield prediction API",
    })
}

/// GET /config — crop and country lists for the frontend, plus model metadata.
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    tracing::info!("Config endpoint called");
    let artifacts = &state.artifacts;
    Json(ConfigResponse {
        items: artifacts.catalog.items.clone(),
        areas: artifacts.catalog.areas.clone(),
        metadata: artifacts.metadata.clone(),
    })
}

/// GET /model_info — model metadata, verbatim.
pub async fn model_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    tracing::info!("Model info endpoint called");
    Json(state.artifacts.metadata.clone())
}
