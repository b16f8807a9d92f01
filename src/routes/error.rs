use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::services::features::FeatureError;
use crate::services::prediction::PredictionError;
use crate::services::validation::ValidationError;

/// Every way a request can fail, and the HTTP answer for each.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API key")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Rejected request body: {0}")]
    Rejected(#[from] JsonRejection),

    #[error(transparent)]
    UnknownCategory(FeatureError),

    /// Detail is logged when the error is created and never sent to the client.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        metrics::counter!("prediction_errors_total", "kind" => err.kind()).increment(1);
        match err {
            PredictionError::Feature(e) => ApiError::UnknownCategory(e),
            PredictionError::Inference(e) => {
                tracing::error!(error = %e, "Model inference failed");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, json!("Invalid API key")),
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, json!(e.fields())),
            ApiError::Rejected(rejection) => (
                rejection.status(),
                json!([{ "field": rejected_field(&rejection), "message": rejection.body_text() }]),
            ),
            ApiError::UnknownCategory(e) => (StatusCode::BAD_REQUEST, json!(e.to_string())),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, json!("Internal error")),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Payload field a body rejection is about, or `body` when it is not about one.
///
/// Type errors carry the serde path before the first `: `. Missing fields are
/// reported at the root, so the name comes from the message itself.
fn rejected_field(rejection: &JsonRejection) -> String {
    let JsonRejection::JsonDataError(err) = rejection else {
        return "body".to_string();
    };
    let text = err.body_text();
    let detail = text
        .strip_prefix("Failed to deserialize the JSON body into the target type: ")
        .unwrap_or(&text);
    field_from_detail(detail).unwrap_or_else(|| "body".to_string())
}

fn field_from_detail(detail: &str) -> Option<String> {
    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(char::is_whitespace) && path != ".")
        .then(|| path.to_string())
}
