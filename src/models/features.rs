use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Named columns of the model input, spelled as the training data spelled them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    #[serde(rename = "Area")]
    #[strum(serialize = "Area")]
    Area,
    #[serde(rename = "Item")]
    #[strum(serialize = "Item")]
    Item,
    #[serde(rename = "Year")]
    #[strum(serialize = "Year")]
    Year,
    AverageRainFallMmPerYear,
    AvgTemp,
    PesticidesTonnesLog,
    ClimateCluster,
    WaterStress,
    RainTempInteraction,
    InputIntensity,
    PestTempInteraction,
}

/// Model input for one request. Built once by the feature pipeline and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Item")]
    pub item: Option<String>,
    #[serde(rename = "Year")]
    pub year: i32,
    pub average_rain_fall_mm_per_year: f64,
    pub avg_temp: f64,
    pub pesticides_tonnes_log: f64,
    pub climate_cluster: i64,
    pub water_stress: f64,
    pub rain_temp_interaction: f64,
    pub input_intensity: f64,
    pub pest_temp_interaction: f64,
}

impl FeatureVector {
    /// Value of a column read as a number. Text columns have none.
    pub fn numeric(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Area | Feature::Item => None,
            Feature::Year => Some(f64::from(self.year)),
            Feature::AverageRainFallMmPerYear => Some(self.average_rain_fall_mm_per_year),
            Feature::AvgTemp => Some(self.avg_temp),
            Feature::PesticidesTonnesLog => Some(self.pesticides_tonnes_log),
            Feature::ClimateCluster => Some(self.climate_cluster as f64),
            Feature::WaterStress => Some(self.water_stress),
            Feature::RainTempInteraction => Some(self.rain_temp_interaction),
            Feature::InputIntensity => Some(self.input_intensity),
            Feature::PestTempInteraction => Some(self.pest_temp_interaction),
        }
    }

    /// Value of a column read as a category label. Continuous columns have none.
    pub fn category(&self, feature: Feature) -> Option<String> {
        match feature {
            Feature::Area => Some(self.area.clone()),
            Feature::Item => self.item.clone(),
            Feature::Year => Some(self.year.to_string()),
            Feature::ClimateCluster => Some(self.climate_cluster.to_string()),
            _ => None,
        }
    }
}
