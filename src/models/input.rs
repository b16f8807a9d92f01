use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::catalog::Catalog;
use crate::services::validation::known_item;

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[garde(context(Catalog))]
pub struct PredictionInput {
    /// Country of production
    #[serde(rename = "Area", deserialize_with = "trimmed")]
    #[garde(skip)]
    pub area: String,

    /// Crop name (e.g. Maize, Wheat)
    #[serde(rename = "Item", deserialize_with = "trimmed")]
    #[garde(custom(known_item))]
    pub item: String,

    #[serde(rename = "Year")]
    #[garde(range(min = 1900, max = 2050))]
    pub year: i32,

    #[garde(range(min = 0.0))]
    pub average_rain_fall_mm_per_year: f64,

    /// Mean annual temperature in °C, any sign
    #[garde(skip)]
    pub avg_temp: f64,

    #[garde(range(min = 0.0))]
    pub pesticides_tonnes: f64,
}

/// Body of `POST /recommend`: the prediction input without a crop.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationInput {
    #[serde(rename = "Area", deserialize_with = "trimmed")]
    #[garde(skip)]
    pub area: String,

    #[serde(rename = "Year")]
    #[garde(range(min = 1900, max = 2050))]
    pub year: i32,

    #[garde(range(min = 0.0))]
    pub average_rain_fall_mm_per_year: f64,

    #[garde(skip)]
    pub avg_temp: f64,

    #[garde(range(min = 0.0))]
    pub pesticides_tonnes: f64,
}

/// A validated, normalized record ready for feature preparation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecord {
    pub area: String,
    pub item: Option<String>,
    pub year: i32,
    pub average_rain_fall_mm_per_year: f64,
    pub avg_temp: f64,
    pub pesticides_tonnes: f64,
}

impl From<PredictionInput> for CropRecord {
    fn from(input: PredictionInput) -> Self {
        Self {
            area: input.area,
            item: Some(input.item),
            year: input.year,
            average_rain_fall_mm_per_year: input.average_rain_fall_mm_per_year,
            avg_temp: input.avg_temp,
            pesticides_tonnes: input.pesticides_tonnes,
        }
    }
}

impl From<RecommendationInput> for CropRecord {
    fn from(input: RecommendationInput) -> Self {
        Self {
            area: input.area,
            item: None,
            year: input.year,
            average_rain_fall_mm_per_year: input.average_rain_fall_mm_per_year,
            avg_temp: input.avg_temp,
            pesticides_tonnes: input.pesticides_tonnes,
        }
    }
}

impl CropRecord {
    /// Copy of this record with `item` injected as the crop.
    pub fn with_item(&self, item: &str) -> Self {
        Self {
            item: Some(item.to_string()),
            ..self.clone()
        }
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}
