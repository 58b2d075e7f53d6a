//! Random forest of classification trees.
//!
//! Probabilities are the mean of each tree's normalised leaf distribution.
//! Row values are narrowed to `f32` before each split comparison, since the
//! exported trees were fitted and scored on `float32` inputs.

use crate::artifact::{EstimatorSchema, TreeSchema};
use crate::classifier::{check_output, check_row, Classifier};
use crate::error::ModelError;

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Validate and convert one tree. `index` is only used in error messages.
    pub fn from_schema(
        schema: &TreeSchema,
        index: usize,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        let invalid = |msg: String| ModelError::InvalidArtifact(format!("tree {index}: {msg}"));

        let n_nodes = schema.children_left.len();
        if n_nodes == 0 {
            return Err(invalid("has no nodes".to_string()));
        }
        if schema.children_right.len() != n_nodes
            || schema.features.len() != n_nodes
            || schema.thresholds.len() != n_nodes
            || schema.values.len() != n_nodes
        {
            return Err(invalid("node arrays have different lengths".to_string()));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let left = schema.children_left[i];
            let right = schema.children_right[i];

            if left == -1 {
                if right != -1 {
                    return Err(invalid(format!("node {i} has only one child")));
                }
                let distribution = normalise(&schema.values[i], n_classes)
                    .map_err(|msg| invalid(format!("leaf {i}: {msg}")))?;
                nodes.push(Node::Leaf { distribution });
                continue;
            }

            // Children must come after their parent; this also rules out cycles.
            let child = |c: i64| -> Result<usize, ModelError> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n_nodes)
                    .ok_or_else(|| invalid(format!("node {i} has invalid child {c}")))
            };
            let feature = usize::try_from(schema.features[i])
                .ok()
                .filter(|&f| f < n_features)
                .ok_or_else(|| {
                    invalid(format!(
                        "node {i} splits on feature {}",
                        schema.features[i]
                    ))
                })?;
            let threshold = schema.thresholds[i];
            if threshold.is_nan() {
                return Err(invalid(format!("node {i} has a NaN threshold")));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    /// Class distribution of the leaf `row` falls into.
    pub fn leaf_distribution(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if split_value(row[*feature]) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// A row value as the tree saw it during fitting.
fn split_value(x: f64) -> f64 {
    f64::from(x as f32)
}

fn normalise(weights: &[f64], n_classes: usize) -> Result<Vec<f64>, String> {
    if weights.len() != n_classes {
        return Err(format!(
            "has {} class weights, expected {n_classes}",
            weights.len()
        ));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err("class weights must be finite and non-negative".to_string());
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err("class weights sum to zero".to_string());
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<Tree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    pub fn from_schema(
        schema: &EstimatorSchema,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        let EstimatorSchema::RandomForest { trees } = schema else {
            return Err(ModelError::InvalidArtifact(
                "expected a random_forest estimator".to_string(),
            ));
        };
        if trees.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }

        let trees = trees
            .iter()
            .enumerate()
            .map(|(i, t)| Tree::from_schema(t, i, n_features, n_classes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.n_features)?;

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(row)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n;
        }

        check_output(&proba, self.n_classes)?;
        Ok(proba)
    }
}
