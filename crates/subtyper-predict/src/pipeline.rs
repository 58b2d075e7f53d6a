use serde_json::Value;
use subtyper_core::models::cluster::Cluster;
use subtyper_core::models::features::FeatureVector;
use subtyper_core::models::input::PredictionInput;
use subtyper_core::models::prediction::PredictionResult;
use subtyper_model::{Classifier, ModelError};

use crate::coerce::extract;
use crate::error::PredictError;
use crate::features::{assemble, derive};
use crate::validate::validate;

/// Everything one pipeline run produced, for callers that persist or log the
/// intermediate values.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub input: PredictionInput,
    pub features: FeatureVector,
    pub result: PredictionResult,
}

/// Classify a raw request body.
pub fn predict(
    classifier: &dyn Classifier,
    raw: &Value,
) -> Result<PredictionResult, PredictError> {
    run(classifier, raw).map(|p| p.result)
}

/// Classify a raw request body, keeping the parsed input and feature row.
pub fn run(classifier: &dyn Classifier, raw: &Value) -> Result<Prediction, PredictError> {
    let input = extract(raw)?;
    predict_input(classifier, input)
}

/// Classify already-parsed measurements.
pub fn predict_input(
    classifier: &dyn Classifier,
    input: PredictionInput,
) -> Result<Prediction, PredictError> {
    let valid = validate(input)?;
    let derived = derive(&valid);
    let features = assemble(&valid, &derived);
    let result = classify(classifier, &features)?;

    Ok(Prediction {
        input,
        features,
        result,
    })
}

fn classify(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<PredictionResult, PredictError> {
    let row = features.to_row();
    let index = classifier.predict(&row)?;
    let proba = classifier.predict_proba(&row)?;

    if proba.len() != Cluster::ALL.len() {
        return Err(ModelError::OutputWidth {
            expected: Cluster::ALL.len(),
            actual: proba.len(),
        }
        .into());
    }
    let cluster_label =
        Cluster::from_index(index).map_err(|_| ModelError::UnknownClass { index })?;
    tracing::debug!(cluster = %cluster_label, "classified feature row");

    Ok(PredictionResult {
        cluster_label,
        probabilities: proba.into_iter().map(round3).collect(),
    })
}

/// Round to three decimals, halves away from zero.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
