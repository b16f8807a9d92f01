use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::routes::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests whose `x-api-key` header does not equal the configured key.
///
/// Runs before body extraction, so an unauthorized request never reaches
/// validation whatever its payload.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == &*state.api_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Access attempt with an invalid API key");
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "Access attempt without an API key");
            Err(ApiError::Unauthorized)
        }
    }
}
