//! On-disk artifact format.
//!
//! These types mirror the JSON document exactly and carry no behaviour.
//! [`crate::model::Model::from_artifact`] validates them and builds the
//! runtime representation.

use serde::{Deserialize, Serialize};

/// Full classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub meta: ArtifactMeta,
    /// Standardisation applied to the row before the estimator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<ScalerSchema>,
    pub estimator: EstimatorSchema,
}

/// Training-time schema the artifact was fitted against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Column names, in column order.
    pub feature_names: Vec<String>,
    /// Class labels, in class-index order.
    pub classes: Vec<String>,
    /// Free-form description, e.g. the training run it came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSchema {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSchema {
    /// Averaged ensemble of classification trees.
    RandomForest { trees: Vec<TreeSchema> },
    /// Multinomial logistic regression.
    Logistic {
        /// One row of weights per class, `[class][feature]`.
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

/// One classification tree in structure-of-arrays layout.
///
/// Node `i` is a leaf when `children_left[i] == -1`. Internal nodes send a
/// row left when `f32(row[features[i]]) <= thresholds[i]`, the row value being
/// rounded to `f32` first. Children always have a larger index than their
/// parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub features: Vec<i64>,
    pub thresholds: Vec<f64>,
    /// Per-node class weights (counts or fractions), `[node][class]`.
    /// Only leaf rows are used.
    pub values: Vec<Vec<f64>>,
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
