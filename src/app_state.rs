use std::sync::Arc;

use crate::services::artifacts::ArtifactSet;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactSet>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(artifacts: ArtifactSet, api_key: &str) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            api_key: Arc::from(api_key),
        }
    }
}
