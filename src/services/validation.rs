use garde::Validate;
use serde::Serialize;
use strsim::jaro_winkler;

use crate::models::catalog::Catalog;
use crate::models::input::{CropRecord, PredictionInput, RecommendationInput};

/// Threshold for suggesting a known name in place of a misspelled one (0.0 - 1.0).
const MATCH_THRESHOLD: f64 = 0.85;

/// One rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Input rejected before it reaches the feature pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid input: {}", describe(.0))]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<garde::Report> for ValidationError {
    fn from(report: garde::Report) -> Self {
        Self(
            report
                .iter()
                .map(|(path, error)| FieldError {
                    field: payload_name(&path.to_string()),
                    message: error.message().to_string(),
                })
                .collect(),
        )
    }
}

/// Name a field the way it appears in the request body.
///
/// garde reports struct field names; three of them are renamed on the wire.
fn payload_name(field: &str) -> String {
    match field {
        "area" => "Area",
        "item" => "Item",
        "year" => "Year",
        other => other,
    }
    .to_string()
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a single-prediction payload against field bounds and the crop catalog.
///
/// Strings arrive already trimmed by deserialization. The item must be an
/// exact match to a catalog entry unless the catalog has no items.
pub fn validate_prediction(
    input: PredictionInput,
    catalog: &Catalog,
) -> Result<CropRecord, ValidationError> {
    input.validate_with(catalog)?;
    Ok(input.into())
}

/// Validate a recommendation payload. Same field rules, no crop.
pub fn validate_recommendation(input: RecommendationInput) -> Result<CropRecord, ValidationError> {
    input.validate()?;
    Ok(input.into())
}

/// garde rule: crop must belong to the catalog vocabulary when one is loaded.
pub fn known_item(value: &str, catalog: &Catalog) -> garde::Result {
    if !catalog.has_items() || catalog.contains_item(value) {
        return Ok(());
    }

    let mut message = format!("Item must be one of {:?}", catalog.items);
    if let Some(suggestion) = closest_match(value, catalog.items.iter().map(String::as_str)) {
        message.push_str(&format!(" (did you mean '{}'?)", suggestion));
    }
    Err(garde::Error::new(message))
}

/// Closest known name by Jaro-Winkler similarity, if any clears the threshold.
pub fn closest_match<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = name.to_lowercase();
    let mut best_score = 0.0_f64;
    let mut best: Option<&'a str> = None;

    for candidate in candidates {
        let score = jaro_winkler(&needle, &candidate.to_lowercase());
        if score >= MATCH_THRESHOLD && score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn catalog() -> Catalog {
        Catalog::new(
            vec!["Maize".to_string(), "Wheat".to_string()],
            vec!["France".to_string(), "India".to_string()],
        )
    }

    fn sample_input() -> PredictionInput {
        PredictionInput {
            area: "France".to_string(),
            item: "Maize".to_string(),
            year: 2020,
            average_rain_fall_mm_per_year: 800.0,
            avg_temp: 15.5,
            pesticides_tonnes: 500.0,
        }
    }

    fn sample_recommendation() -> RecommendationInput {
        RecommendationInput {
            area: "France".to_string(),
            year: 2020,
            average_rain_fall_mm_per_year: 800.0,
            avg_temp: 15.5,
            pesticides_tonnes: 500.0,
        }
    }

    fn field_names(err: &ValidationError) -> Vec<&str> {
        let mut names: Vec<&str> = err.fields().iter().map(|f| f.field.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn test_valid_input() {
        let record = assert_ok!(validate_prediction(sample_input(), &catalog()));
        assert_eq!(record.area, "France");
        assert_eq!(record.item.as_deref(), Some("Maize"));
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        for year in [1900, 2050] {
            let input = PredictionInput { year, ..sample_input() };
            assert_ok!(validate_prediction(input, &catalog()));
        }
        for year in [1899, 2051] {
            let input = PredictionInput { year, ..sample_input() };
            let err = assert_err!(validate_prediction(input, &catalog()));
            assert_eq!(field_names(&err), vec!["Year"]);
        }
    }

    #[test]
    fn test_negative_quantities_rejected() {
        let input = PredictionInput {
            average_rain_fall_mm_per_year: -1.0,
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert_eq!(field_names(&err), vec!["average_rain_fall_mm_per_year"]);

        let input = PredictionInput {
            pesticides_tonnes: -1.0,
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert_eq!(field_names(&err), vec!["pesticides_tonnes"]);
    }

    #[test]
    fn test_negative_temperature_allowed() {
        let input = PredictionInput {
            avg_temp: -12.0,
            ..sample_input()
        };
        assert_ok!(validate_prediction(input, &catalog()));
    }

    #[test]
    fn test_every_bad_field_reported() {
        let input = PredictionInput {
            year: 1800,
            pesticides_tonnes: -5.0,
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert_eq!(field_names(&err), vec!["Year", "pesticides_tonnes"]);
    }

    #[test]
    fn test_fields_named_as_sent() {
        let input = PredictionInput {
            item: "Nope".to_string(),
            year: 1800,
            average_rain_fall_mm_per_year: -1.0,
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert_eq!(
            field_names(&err),
            vec!["Item", "Year", "average_rain_fall_mm_per_year"]
        );
    }

    #[test]
    fn test_unknown_item_names_allowed_set() {
        let input = PredictionInput {
            item: "UnknownCrop".to_string(),
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert_eq!(field_names(&err), vec!["Item"]);
        assert!(err.fields()[0].message.contains("Item must be one of"));
        assert!(err.fields()[0].message.contains("Wheat"));
    }

    #[test]
    fn test_unknown_item_suggests_close_name() {
        let input = PredictionInput {
            item: "Maiz".to_string(),
            ..sample_input()
        };
        let err = assert_err!(validate_prediction(input, &catalog()));
        assert!(err.fields()[0].message.contains("did you mean 'Maize'"));
    }

    #[test]
    fn test_item_check_skipped_without_vocabulary() {
        let input = PredictionInput {
            item: "Anything".to_string(),
            ..sample_input()
        };
        assert_ok!(validate_prediction(input, &Catalog::default()));
    }

    #[test]
    fn test_strip_whitespace() {
        let payload = serde_json::json!({
            "Area": "  France  ",
            "Item": " Maize ",
            "Year": 2020,
            "average_rain_fall_mm_per_year": 800.0,
            "avg_temp": 15.5,
            "pesticides_tonnes": 500.0
        });
        let input: PredictionInput = serde_json::from_value(payload).unwrap();
        let record = assert_ok!(validate_prediction(input, &catalog()));
        assert_eq!(record.area, "France");
        assert_eq!(record.item.as_deref(), Some("Maize"));
    }

    #[test]
    fn test_valid_recommend_input() {
        let record = assert_ok!(validate_recommendation(sample_recommendation()));
        assert_eq!(record.area, "France");
        assert!(record.item.is_none());
    }

    #[test]
    fn test_recommend_input_range_rules() {
        let input = RecommendationInput {
            year: 2051,
            ..sample_recommendation()
        };
        let err = assert_err!(validate_recommendation(input));
        assert_eq!(field_names(&err), vec!["Year"]);
    }

    #[test]
    fn test_closest_match_threshold() {
        let names = ["France", "Finland", "India"];
        assert_eq!(closest_match("france", names), Some("France"));
        assert_eq!(closest_match("Frence", names), Some("France"));
        assert_eq!(closest_match("Zimbabwe", names), None);
    }
}
