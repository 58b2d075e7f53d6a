use std::path::Path;

use subtyper_core::models::cluster::Cluster;
use subtyper_core::models::features::{FEATURE_NAMES, N_FEATURES};

use crate::artifact::{EstimatorSchema, ModelArtifact};
use crate::classifier::Classifier;
use crate::error::ModelError;
use crate::forest::RandomForest;
use crate::linear::LogisticRegression;
use crate::scaler::StandardScaler;

#[derive(Debug, Clone)]
enum Estimator {
    Forest(RandomForest),
    Logistic(LogisticRegression),
}

/// The loaded subtype classifier.
///
/// Construction checks the artifact against the service's feature schema and
/// cluster table, so a `Model` that exists always accepts a
/// [`FeatureVector`](subtyper_core::models::features::FeatureVector) row and
/// returns one probability per [`Cluster`].
#[derive(Debug, Clone)]
pub struct Model {
    scaler: Option<StandardScaler>,
    estimator: Estimator,
    description: Option<String>,
}

impl Model {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ModelError> {
        check_feature_names(&artifact.meta.feature_names)?;
        check_classes(&artifact.meta.classes)?;

        let n_classes = Cluster::ALL.len();
        let scaler = artifact
            .scaler
            .as_ref()
            .map(|s| StandardScaler::from_schema(s, N_FEATURES))
            .transpose()?;

        let estimator = match &artifact.estimator {
            schema @ EstimatorSchema::RandomForest { .. } => {
                Estimator::Forest(RandomForest::from_schema(schema, N_FEATURES, n_classes)?)
            }
            schema @ EstimatorSchema::Logistic { .. } => Estimator::Logistic(
                LogisticRegression::from_schema(schema, N_FEATURES, n_classes)?,
            ),
        };

        Ok(Self {
            scaler,
            estimator,
            description: artifact.meta.description.clone(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact = ModelArtifact::from_json(json)?;
        Self::from_artifact(&artifact)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Short name of the estimator family, for logs.
    pub fn kind(&self) -> &'static str {
        match self.estimator {
            Estimator::Forest(_) => "random_forest",
            Estimator::Logistic(_) => "logistic",
        }
    }

    fn estimator(&self) -> &dyn Classifier {
        match &self.estimator {
            Estimator::Forest(f) => f as &dyn Classifier,
            Estimator::Logistic(l) => l as &dyn Classifier,
        }
    }
}

impl Classifier for Model {
    fn n_features(&self) -> usize {
        N_FEATURES
    }

    fn n_classes(&self) -> usize {
        Cluster::ALL.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        match &self.scaler {
            Some(scaler) => {
                crate::classifier::check_row(row, N_FEATURES)?;
                self.estimator().predict_proba(&scaler.transform(row))
            }
            None => self.estimator().predict_proba(row),
        }
    }
}

/// Read, parse, and validate the artifact at `path`.
///
/// Called once at startup; any error here should abort the process.
pub fn load(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ModelError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ModelError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let model = Model::from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        kind = model.kind(),
        "loaded classifier"
    );
    Ok(model)
}

fn check_feature_names(actual: &[String]) -> Result<(), ModelError> {
    if actual.iter().map(String::as_str).ne(FEATURE_NAMES) {
        return Err(ModelError::FeatureSchema {
            expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

fn check_classes(actual: &[String]) -> Result<(), ModelError> {
    if actual.iter().map(String::as_str).ne(Cluster::ALL.map(Cluster::label)) {
        return Err(ModelError::ClassSchema {
            expected: Cluster::ALL.iter().map(|c| c.to_string()).collect(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}
