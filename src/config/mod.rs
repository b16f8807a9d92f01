use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Shared secret expected in the `x-api-key` header of protected routes
    pub api_key: String,

    /// Server bind address (e.g., "0.0.0.0:8000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the model, cluster mapping, catalog and metadata files
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_artifacts_dir() -> String {
    "model_artifacts".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
