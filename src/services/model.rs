//! Trained yield model loaded from `final_model.json`.
//!
//! The artifact mirrors the training pipeline: a column transformer
//! (standardized numeric columns, one-hot categorical columns) followed by
//! either a linear estimator or a forest of regression trees. The model
//! outputs `ln(1 + yield)`; undoing that is the caller's job.

use serde::Deserialize;

use crate::models::features::{Feature, FeatureVector};

/// Anything that maps a feature vector to a log-space yield.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Feature '{0}' has no numeric value")]
    MissingNumeric(Feature),

    #[error("Feature '{0}' has no categorical value")]
    MissingCategory(Feature),

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ModelShapeError {
    #[error("Linear model has {found} coefficients but the encoder produces {expected} columns")]
    CoefficientCount { expected: usize, found: usize },

    #[error("Forest has no trees")]
    EmptyForest,

    #[error("Tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("Tree {tree} node {node} splits on column {column}, encoder width is {width}")]
    ColumnOutOfRange {
        tree: usize,
        node: usize,
        column: usize,
        width: usize,
    },

    #[error("Tree {tree} node {node} has a child index that is not after it")]
    BadChild { tree: usize, node: usize },
}

/// Numeric column, standardized as `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct NumericColumn {
    pub feature: Feature,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// Categorical column, one-hot encoded. Unseen categories encode to zeros.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalColumn {
    pub feature: Feature,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of tree outputs.
    #[default]
    Mean,
    /// Boosted trees: sum of tree outputs.
    Sum,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature_index: usize,
        threshold: f64,
        #[serde(default)]
        default_left: bool,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Regression tree stored as a node array with the root at index 0.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let mut index = 0;
        loop {
            let node = self.nodes.get(index).ok_or_else(|| {
                InferenceError::Evaluation(format!("node {} out of bounds", index))
            })?;
            match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Split {
                    feature_index,
                    threshold,
                    default_left,
                    left,
                    right,
                } => {
                    let value = *row.get(*feature_index).ok_or_else(|| {
                        InferenceError::Evaluation(format!("column {} out of bounds", feature_index))
                    })?;
                    let go_left = if value.is_nan() {
                        *default_left
                    } else {
                        value < *threshold
                    };
                    index = if go_left { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Forest {
        #[serde(default)]
        base_score: f64,
        #[serde(default)]
        aggregation: Aggregation,
        trees: Vec<Tree>,
    },
}

/// A shape-checked model. Only obtainable through deserialization, which runs
/// [`YieldModel::check`], so every tree it holds terminates.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ModelArtifact")]
pub struct YieldModel {
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
    estimator: Estimator,
}

/// `final_model.json` as written, before the shape check.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    #[serde(default)]
    numeric: Vec<NumericColumn>,
    #[serde(default)]
    categorical: Vec<CategoricalColumn>,
    estimator: Estimator,
}

impl TryFrom<ModelArtifact> for YieldModel {
    type Error = ModelShapeError;

    fn try_from(artifact: ModelArtifact) -> Result<Self, Self::Error> {
        let model = Self {
            numeric: artifact.numeric,
            categorical: artifact.categorical,
            estimator: artifact.estimator,
        };
        model.check()?;
        Ok(model)
    }
}

impl YieldModel {
    /// Number of columns the encoder emits.
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Check that the estimator fits the encoder and that every tree terminates.
    fn check(&self) -> Result<(), ModelShapeError> {
        let width = self.width();
        match &self.estimator {
            Estimator::Linear { coefficients, .. } => {
                if coefficients.len() != width {
                    return Err(ModelShapeError::CoefficientCount {
                        expected: width,
                        found: coefficients.len(),
                    });
                }
            }
            Estimator::Forest { trees, .. } => {
                if trees.is_empty() {
                    return Err(ModelShapeError::EmptyForest);
                }
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(ModelShapeError::EmptyTree { tree: t });
                    }
                    for (n, node) in tree.nodes.iter().enumerate() {
                        if let Node::Split {
                            feature_index,
                            left,
                            right,
                            ..
                        } = node
                        {
                            if *feature_index >= width {
                                return Err(ModelShapeError::ColumnOutOfRange {
                                    tree: t,
                                    node: n,
                                    column: *feature_index,
                                    width,
                                });
                            }
                            // Children strictly after the parent rules out cycles.
                            let in_bounds = |child: usize| child > n && child < tree.nodes.len();
                            if !in_bounds(*left) || !in_bounds(*right) {
                                return Err(ModelShapeError::BadChild { tree: t, node: n });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply the column transformer to one feature vector.
    pub fn encode(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        let mut row = Vec::with_capacity(self.width());

        for column in &self.numeric {
            let value = features
                .numeric(column.feature)
                .ok_or(InferenceError::MissingNumeric(column.feature))?;
            let scale = if column.scale == 0.0 { 1.0 } else { column.scale };
            row.push((value - column.mean) / scale);
        }

        for column in &self.categorical {
            let value = features
                .category(column.feature)
                .ok_or(InferenceError::MissingCategory(column.feature))?;
            row.extend(
                column
                    .categories
                    .iter()
                    .map(|c| if *c == value { 1.0 } else { 0.0 }),
            );
        }

        Ok(row)
    }
}

impl Regressor for YieldModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let row = self.encode(features)?;

        let output = match &self.estimator {
            Estimator::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(&row)
                        .map(|(w, x)| w * x)
                        .sum::<f64>()
            }
            Estimator::Forest {
                base_score,
                aggregation,
                trees,
            } => {
                let total = trees
                    .iter()
                    .map(|tree| tree.evaluate(&row))
                    .sum::<Result<f64, _>>()?;
                match aggregation {
                    Aggregation::Mean => base_score + total / trees.len() as f64,
                    Aggregation::Sum => base_score + total,
                }
            }
        };

        Ok(output)
    }
}
