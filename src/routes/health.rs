use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub artifacts: ArtifactHealth,
}

#[derive(Serialize)]
pub struct ArtifactHealth {
    pub status: String,
    pub items: usize,
    pub areas: usize,
    pub clusters: usize,
}

/// GET /health — liveness plus a summary of the loaded artifacts.
///
/// Degraded when the catalog or cluster mapping is empty: the service still
/// answers, but recommendations or predictions cannot succeed.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let artifacts = &state.artifacts;
    let healthy = artifacts.catalog.has_items() && !artifacts.clusters.is_empty();

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status = if healthy { "ok" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            artifacts: ArtifactHealth {
                status: status.to_string(),
                items: artifacts.catalog.items.len(),
                areas: artifacts.catalog.areas.len(),
                clusters: artifacts.clusters.len(),
            },
        },
    };

    (status_code, Json(response))
}
