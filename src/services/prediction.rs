use std::time::Instant;

use crate::models::catalog::{Catalog, ClusterMap};
use crate::models::input::CropRecord;
use crate::models::prediction::RecommendationResult;
use crate::services::features::{prepare_features, FeatureError};
use crate::services::model::{InferenceError, Regressor};

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    /// Label used for the `kind` dimension of error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Feature(_) => "unknown_category",
            PredictionError::Inference(_) => "inference",
        }
    }
}

/// Predict the yield (hg/ha) for one validated record.
///
/// Runs the feature pipeline, calls the model, and maps the log-space output
/// back with `exp(x) - 1`.
pub fn predict_single(
    record: &CropRecord,
    clusters: &ClusterMap,
    model: &dyn Regressor,
) -> Result<f64, PredictionError> {
    let start = Instant::now();

    let features = prepare_features(record, clusters)?;
    tracing::debug!(?features, "Feature engineering complete");

    let raw = model.predict(&features)?;
    let prediction = raw.exp_m1();

    metrics::histogram!("prediction_seconds").record(start.elapsed().as_secs_f64());
    tracing::info!(
        area = %record.area,
        item = record.item.as_deref().unwrap_or_default(),
        prediction,
        "Prediction complete"
    );

    Ok(prediction)
}

/// Predict every catalog item for the same conditions.
///
/// Each item is an independent pipeline run; results keep catalog order. The
/// first failure aborts the whole request, no partial ranking is returned.
pub fn recommend(
    record: &CropRecord,
    catalog: &Catalog,
    clusters: &ClusterMap,
    model: &dyn Regressor,
) -> Result<RecommendationResult, PredictionError> {
    let entries = catalog
        .items
        .iter()
        .map(|item| {
            let candidate = record.with_item(item);
            predict_single(&candidate, clusters, model).map(|value| (item.clone(), value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let result = RecommendationResult::new(entries);
    if result.is_empty() {
        tracing::warn!(area = %record.area, "Catalog has no items, nothing to recommend");
    } else if let Some((item, value)) = result.best() {
        tracing::info!(
            area = %record.area,
            candidates = result.len(),
            best = item,
            prediction = value,
            "Recommendation complete"
        );
    }

    Ok(result)
}
