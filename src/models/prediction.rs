use serde::ser::Serializer;
use serde::Serialize;

/// Response of `POST /predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    /// Yield in hectograms per hectare.
    ///
    /// The feature arithmetic is unguarded, so zero rainfall or temperature can
    /// yield an infinite or NaN prediction. JSON has no such numbers and those
    /// serialize as `null`: a `null` here means the model output was non-finite.
    #[serde(rename = "prediction (hg/ha)")]
    pub prediction: f64,
}

/// Predicted yield per catalog item, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationResult {
    entries: Vec<(String, f64)>,
}

impl RecommendationResult {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Item with the highest finite predicted yield. Ties keep the earlier item.
    pub fn best(&self) -> Option<(&str, f64)> {
        self.iter()
            .filter(|(_, value)| value.is_finite())
            .fold(None, |best, candidate| match best {
                Some((_, top)) if top >= candidate.1 => best,
                _ => Some(candidate),
            })
    }
}

// Serialized as a JSON object whose key order is the catalog order.
impl Serialize for RecommendationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, value)| (name, value)))
    }
}

/// Response of `POST /recommend`.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: RecommendationResult,
}
