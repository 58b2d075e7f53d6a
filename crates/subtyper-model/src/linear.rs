use crate::artifact::EstimatorSchema;
use crate::classifier::{check_output, check_row, Classifier};
use crate::error::ModelError;

/// Multinomial logistic regression: softmax over `W·x + b`.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// `[class][feature]`.
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    n_features: usize,
}

impl LogisticRegression {
    pub fn new(
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        if coefficients.len() != n_classes || intercepts.len() != n_classes {
            return Err(ModelError::InvalidArtifact(format!(
                "logistic model has {} coefficient rows and {} intercepts for {n_classes} classes",
                coefficients.len(),
                intercepts.len(),
            )));
        }
        if let Some(class) = coefficients.iter().position(|w| w.len() != n_features) {
            return Err(ModelError::InvalidArtifact(format!(
                "coefficient row for class {class} has {} weights, expected {n_features}",
                coefficients[class].len(),
            )));
        }

        Ok(Self {
            coefficients,
            intercepts,
            n_features,
        })
    }

    pub fn from_schema(
        schema: &EstimatorSchema,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, ModelError> {
        match schema {
            EstimatorSchema::Logistic {
                coefficients,
                intercepts,
            } => Self::new(coefficients.clone(), intercepts.clone(), n_features, n_classes),
            EstimatorSchema::RandomForest { .. } => Err(ModelError::InvalidArtifact(
                "expected a logistic estimator".to_string(),
            )),
        }
    }

    fn margins(&self, row: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.n_features)?;
        let mut proba = self.margins(row);
        softmax_inplace(&mut proba);
        check_output(&proba, self.n_classes())?;
        Ok(proba)
    }
}

/// Softmax, subtracting the row max before exponentiating.
pub fn softmax_inplace(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}
