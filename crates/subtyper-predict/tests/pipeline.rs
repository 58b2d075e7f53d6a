use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};
use subtyper_core::models::cluster::Cluster;
use subtyper_model::{Classifier, Model, ModelError};
use subtyper_predict::pipeline::round3;
use subtyper_predict::{predict, run, PredictError};

const DEMO_FOREST: &str = include_str!("../../../testdata/demo_forest.json");

fn demo_model() -> Model {
    Model::from_json(DEMO_FOREST).unwrap()
}

fn golden_body() -> Value {
    json!({
        "gad": 0, "hba1c": 7.0, "bmi": 25.0, "age": 30, "cpeptide": 1.0, "glucose": 6.0
    })
}

/// Returns canned output regardless of the row.
struct Fixed {
    index: usize,
    proba: Vec<f64>,
}

impl Classifier for Fixed {
    fn n_features(&self) -> usize {
        6
    }

    fn n_classes(&self) -> usize {
        self.proba.len()
    }

    fn predict_proba(&self, _row: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(self.proba.clone())
    }

    fn predict(&self, _row: &[f64]) -> Result<usize, ModelError> {
        Ok(self.index)
    }
}

/// Fails every call; stands in for an artifact that does not match the row.
struct Broken;

impl Classifier for Broken {
    fn n_features(&self) -> usize {
        4
    }

    fn n_classes(&self) -> usize {
        5
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::RowWidth {
            expected: 4,
            actual: row.len(),
        })
    }
}

/// Records the row it was asked to classify.
struct Recording(std::sync::Mutex<Vec<f64>>);

impl Classifier for Recording {
    fn n_features(&self) -> usize {
        6
    }

    fn n_classes(&self) -> usize {
        5
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        *self.0.lock().unwrap() = row.to_vec();
        Ok(vec![0.2; 5])
    }
}

#[test]
fn golden_fixture_derives_homa_indices() {
    let prediction = run(&demo_model(), &golden_body()).unwrap();

    assert!((prediction.features.homa1_cpeptide_b - 48.0).abs() < 1e-9);
    assert!((prediction.features.homa1_cpeptide_ir - 1.6).abs() < 1e-9);
}

#[test]
fn classifier_receives_row_in_training_order() {
    let recording = Recording(std::sync::Mutex::new(Vec::new()));
    predict(&recording, &golden_body()).unwrap();

    let row = recording.0.lock().unwrap().clone();
    assert_eq!(row.len(), 6);
    assert_eq!(&row[..4], &[0.0, 7.0, 25.0, 30.0]);
    assert!((row[4] - 48.0).abs() < 1e-9);
    assert!((row[5] - 1.6).abs() < 1e-9);
}

#[test]
fn golden_fixture_classifies_with_demo_forest() {
    let result = predict(&demo_model(), &golden_body()).unwrap();

    assert_eq!(result.cluster_label, Cluster::Mard);
    assert_eq!(result.probabilities, vec![0.05, 0.217, 0.133, 0.283, 0.317]);
}

#[test]
fn gad_positive_is_autoimmune_in_demo_forest() {
    let mut body = golden_body();
    body["gad"] = json!(1);
    let result = predict(&demo_model(), &body).unwrap();
    assert_eq!(result.cluster_label, Cluster::Said);
}

#[test]
fn valid_inputs_yield_a_distribution_over_five_labels() {
    let model = demo_model();
    let grid = [
        (0, 4.7, 19.0, 18.0, 0.2, 3.50001),
        (1, 18.1, 60.0, 88.0, 3.5, 25.0),
        (0, 9.5, 35.0, 55.0, 0.6, 12.0),
        (1, 6.1, 22.0, 41.0, 2.2, 4.0),
        (0, 11.0, 29.9, 39.0, 1.9, 8.5),
    ];
    for (gad, hba1c, bmi, age, cpeptide, glucose) in grid {
        let body = json!({
            "gad": gad, "hba1c": hba1c, "bmi": bmi, "age": age,
            "cpeptide": cpeptide, "glucose": glucose
        });
        let result = predict(&model, &body).unwrap();

        assert!(Cluster::ALL.contains(&result.cluster_label));
        assert_eq!(result.probabilities.len(), 5);
        assert!(result.probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        let sum: f64 = result.probabilities.iter().sum();
        assert!((sum - 1.0).abs() <= 0.01, "sum = {sum}");
    }
}

#[test]
fn glucose_boundaries() {
    let model = demo_model();
    let with_glucose = |g: f64| {
        let mut body = golden_body();
        body["glucose"] = json!(g);
        predict(&model, &body)
    };

    let err = with_glucose(3.5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Glucose value must be greater than 3.5 and less than or equal to 25 mmol/L."
    );
    assert!(with_glucose(3.50001).is_ok());
    assert!(with_glucose(25.0).is_ok());
}

#[test]
fn invalid_gad_fails_before_inference() {
    for gad in [json!(0.5), json!(2), json!(-1)] {
        let mut body = golden_body();
        body["gad"] = gad;
        let err = predict(&Broken, &body).unwrap_err();
        assert!(matches!(err, PredictError::OutOfRange { .. }));
        assert_eq!(
            err.to_string(),
            "GAD autoantibody value must be 0 (negative) or 1 (positive)."
        );
    }
}

#[test]
fn missing_field_is_generic_regardless_of_which() {
    for key in ["gad", "hba1c", "bmi", "age", "cpeptide", "glucose"] {
        let mut body = golden_body();
        body.as_object_mut().unwrap().remove(key);
        let err = predict(&demo_model(), &body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input data", "{key}");
    }
}

#[test]
fn model_failure_is_an_inference_error() {
    let err = predict(&Broken, &golden_body()).unwrap_err();
    assert!(matches!(err, PredictError::Inference(ModelError::RowWidth { .. })));
    assert!(!err.is_client_error());
}

#[test]
fn class_index_outside_label_table_is_an_inference_error() {
    let classifier = Fixed {
        index: 7,
        proba: vec![0.2; 5],
    };
    let err = predict(&classifier, &golden_body()).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Inference(ModelError::UnknownClass { index: 7 })
    ));
}

#[test]
fn wrong_probability_width_is_an_inference_error() {
    let classifier = Fixed {
        index: 0,
        proba: vec![0.5, 0.5],
    };
    let err = predict(&classifier, &golden_body()).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Inference(ModelError::OutputWidth { .. })
    ));
}

#[test]
fn label_comes_from_predicted_index() {
    let classifier = Fixed {
        index: 2,
        proba: vec![0.1, 0.2, 0.4, 0.2, 0.1],
    };
    let result = predict(&classifier, &golden_body()).unwrap();
    assert_eq!(result.cluster_label, Cluster::Sird);
}

#[test]
fn probabilities_are_rounded_to_three_decimals() {
    let classifier = Fixed {
        index: 1,
        proba: vec![0.123_456, 0.400_04, 0.2, 0.176_544, 0.099_96],
    };
    let result = predict(&classifier, &golden_body()).unwrap();
    assert_eq!(result.probabilities, vec![0.123, 0.4, 0.2, 0.177, 0.1]);

    for p in result.probabilities {
        assert_eq!(round3(p), p);
        let text = format!("{p:.3}");
        assert_eq!(text.parse::<f64>().unwrap(), p);
    }
}

#[test]
fn round3_rounds_halves_away_from_zero() {
    assert_eq!(round3(0.0625), 0.063);
    assert_eq!(round3(0.0), 0.0);
    assert_eq!(round3(1.0), 1.0);
}

#[test]
fn predict_is_idempotent() {
    let model = demo_model();
    let first = predict(&model, &golden_body()).unwrap();
    let second = predict(&model, &golden_body()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_model_serves_concurrent_callers() {
    let model: Arc<dyn Classifier> = Arc::new(demo_model());
    let expected = predict(model.as_ref(), &golden_body()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let model = Arc::clone(&model);
            thread::spawn(move || predict(model.as_ref(), &golden_body()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
