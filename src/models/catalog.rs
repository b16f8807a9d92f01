use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Crop and country names the service recognizes (`cat_info.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "Items", default)]
    pub items: Vec<String>,

    #[serde(rename = "Areas", default)]
    pub areas: Vec<String>,
}

impl Catalog {
    pub fn new(items: Vec<String>, areas: Vec<String>) -> Self {
        Self { items, areas }
    }

    /// An empty item list means the vocabulary is unavailable and membership
    /// checks are skipped.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn contains_item(&self, item: &str) -> bool {
        self.items.iter().any(|known| known == item)
    }
}

/// Country name to climate cluster id (`country_to_cluster.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterMap(HashMap<String, i64>);

impl ClusterMap {
    pub fn get(&self, area: &str) -> Option<i64> {
        self.0.get(area).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, i64)> for ClusterMap {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
