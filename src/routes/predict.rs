use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::models::input::{PredictionInput, RecommendationInput};
use crate::models::prediction::{PredictionResponse, RecommendationResponse};
use crate::routes::error::ApiError;
use crate::routes::extract::ValidJson;
use crate::services::{prediction, validation};

/// POST /predict — predicted yield for one crop.
pub async fn predict(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<PredictionInput>,
) -> Result<Json<PredictionResponse>, ApiError> {
    tracing::info!(payload = ?input, "Prediction request received");
    let artifacts = &state.artifacts;

    let record = validation::validate_prediction(input, &artifacts.catalog)?;
    let prediction =
        prediction::predict_single(&record, &artifacts.clusters, artifacts.model.as_ref())?;

    metrics::counter!("predictions_total").increment(1);
    Ok(Json(PredictionResponse { prediction }))
}

/// POST /recommend — predicted yield for every catalog crop under the same conditions.
pub async fn recommend(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RecommendationInput>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    tracing::info!(payload = ?input, "Recommendation request received");
    let artifacts = &state.artifacts;

    let record = validation::validate_recommendation(input)?;
    let recommendations = prediction::recommend(
        &record,
        &artifacts.catalog,
        &artifacts.clusters,
        artifacts.model.as_ref(),
    )?;

    metrics::counter!("recommendations_total").increment(1);
    Ok(Json(RecommendationResponse { recommendations }))
}
