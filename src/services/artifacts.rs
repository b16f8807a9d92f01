use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::catalog::{Catalog, ClusterMap};
use crate::services::model::{Regressor, YieldModel};

pub const MODEL_FILE: &str = "final_model.json";
pub const CLUSTER_FILE: &str = "country_to_cluster.json";
pub const CATALOG_FILE: &str = "cat_info.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Everything loaded from the artifacts directory at startup. Read-only for
/// the life of the process.
pub struct ArtifactSet {
    pub model: Arc<dyn Regressor>,
    pub clusters: ClusterMap,
    pub catalog: Catalog,
    /// Training metadata (metrics, feature list, ...) served verbatim.
    pub metadata: serde_json::Value,
}

impl ArtifactSet {
    pub fn new(
        model: Arc<dyn Regressor>,
        clusters: ClusterMap,
        catalog: Catalog,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            model,
            clusters,
            catalog,
            metadata,
        }
    }

    /// Load all four artifacts from `dir`. Any missing or malformed file fails the load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        // Shape errors surface as parse errors on the model file.
        let model: YieldModel = read_json(&dir.join(MODEL_FILE))?;
        let clusters: ClusterMap = read_json(&dir.join(CLUSTER_FILE))?;
        let catalog: Catalog = read_json(&dir.join(CATALOG_FILE))?;
        let metadata: serde_json::Value = read_json(&dir.join(METADATA_FILE))?;

        tracing::info!(
            dir = %dir.display(),
            model_columns = model.width(),
            items = catalog.items.len(),
            areas = catalog.areas.len(),
            clusters = clusters.len(),
            "Model and artifacts loaded"
        );

        if let Some(missing) = catalog.areas.iter().find(|a| clusters.get(a).is_none()) {
            tracing::warn!(area = %missing, "Catalog area has no climate cluster");
        }

        Ok(Self::new(Arc::new(model), clusters, catalog, metadata))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
