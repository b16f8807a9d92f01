//! Artifact sets and payloads shared by the router tests

use crop_yield_api::app_state::AppState;
use crop_yield_api::models::catalog::{Catalog, ClusterMap};
use crop_yield_api::models::features::FeatureVector;
use crop_yield_api::services::artifacts::ArtifactSet;
use crop_yield_api::services::model::{InferenceError, Regressor};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test_key_123";

/// Prediction of the bundled model for [`france_maize`], computed offline.
pub const FRANCE_MAIZE_YIELD: f64 = 66_922.264_732_200_29;

pub fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model_artifacts")
}

/// State backed by the artifacts shipped in `model_artifacts/`.
pub fn bundled_state() -> AppState {
    let artifacts = ArtifactSet::load(artifacts_dir()).expect("bundled artifacts load");
    AppState::new(artifacts, TEST_API_KEY)
}

/// Model that returns `water_stress` in log space, or fails for one crop.
pub struct StubModel {
    pub fail_on: Option<&'static str>,
}

impl Regressor for StubModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if features.item.as_deref() == self.fail_on {
            return Err(InferenceError::Evaluation(
                "column layout mismatch at /srv/models/final_model.json".to_string(),
            ));
        }
        Ok(features.water_stress)
    }
}

/// Three crops, two countries, stub model.
pub fn stub_state(fail_on: Option<&'static str>) -> AppState {
    let catalog = Catalog::new(
        vec!["Wheat".to_string(), "Maize".to_string(), "Potatoes".to_string()],
        vec!["France".to_string(), "India".to_string()],
    );
    let clusters: ClusterMap = [("France".to_string(), 2), ("India".to_string(), 0)]
        .into_iter()
        .collect();
    let artifacts = ArtifactSet::new(
        Arc::new(StubModel { fail_on }),
        clusters,
        catalog,
        json!({ "metrics": { "MAE": 1.0 } }),
    );
    AppState::new(artifacts, TEST_API_KEY)
}

pub fn france_maize() -> Value {
    json!({
        "Area": "France",
        "Item": "Maize",
        "Year": 2021,
        "average_rain_fall_mm_per_year": 1000.0,
        "avg_temp": 20.0,
        "pesticides_tonnes": 50.0
    })
}

pub fn france_conditions() -> Value {
    json!({
        "Area": "France",
        "Year": 2021,
        "average_rain_fall_mm_per_year": 1000.0,
        "avg_temp": 20.0,
        "pesticides_tonnes": 50.0
    })
}
