use tracing_subscriber::EnvFilter;

use crop_yield_api::app_state::AppState;
use crop_yield_api::config::AppConfig;
use crop_yield_api::routes;
use crop_yield_api::services::artifacts::ArtifactSet;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration (is API_KEY set?)");
    if config.api_key.trim().is_empty() {
        tracing::error!("API_KEY environment variable is empty");
        panic!("API_KEY must not be empty");
    }

    tracing::info!("Initializing crop-yield-api server");

    let prometheus_handle =
        routes::metrics::install_recorder().expect("Failed to install Prometheus metrics recorder");

    tracing::info!(dir = %config.artifacts_dir, "Loading model and artifacts");
    let artifacts = match ArtifactSet::load(&config.artifacts_dir) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load artifacts");
            panic!("Failed to load artifacts: {e}");
        }
    };

    let state = AppState::new(artifacts, &config.api_key);

    let app = routes::create_router(state, config.max_body_bytes)
        .merge(routes::metrics::router(prometheus_handle));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
