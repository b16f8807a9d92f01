use crate::models::catalog::ClusterMap;
use crate::models::features::FeatureVector;
use crate::models::input::CropRecord;
use crate::services::validation::closest_match;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("Unknown country: {area}{}", hint(.suggestion))]
    UnknownCategory {
        area: String,
        suggestion: Option<String>,
    },
}

fn hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}

/// Turn a validated record into the feature vector the model was trained on.
///
/// Steps run in a fixed order:
/// 1. `pesticides_tonnes` is replaced by `ln(1 + pesticides_tonnes)`
/// 2. `Area` is mapped to its climate cluster (unknown countries fail here)
/// 3. interaction features are derived from the transformed values
///
/// Division by a zero temperature or rainfall is not guarded; the resulting
/// infinities and NaNs are passed through to the model.
pub fn prepare_features(
    record: &CropRecord,
    clusters: &ClusterMap,
) -> Result<FeatureVector, FeatureError> {
    let pesticides_tonnes_log = record.pesticides_tonnes.ln_1p();

    let climate_cluster = clusters.get(&record.area).ok_or_else(|| {
        tracing::warn!(area = %record.area, "Unknown country");
        FeatureError::UnknownCategory {
            area: record.area.clone(),
            suggestion: closest_match(&record.area, clusters.countries()).map(str::to_string),
        }
    })?;

    let rain = record.average_rain_fall_mm_per_year;
    let temp = record.avg_temp;

    Ok(FeatureVector {
        area: record.area.clone(),
        item: record.item.clone(),
        year: record.year,
        average_rain_fall_mm_per_year: rain,
        avg_temp: temp,
        pesticides_tonnes_log,
        climate_cluster,
        water_stress: rain / temp,
        rain_temp_interaction: rain * temp,
        input_intensity: pesticides_tonnes_log / rain,
        pest_temp_interaction: pesticides_tonnes_log * temp,
    })
}
