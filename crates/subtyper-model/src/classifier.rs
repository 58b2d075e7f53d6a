use crate::error::ModelError;

/// A multiclass classifier over a fixed-width numeric row.
///
/// Implementations are immutable after construction; inference takes `&self`
/// and may run concurrently from many requests.
pub trait Classifier: Send + Sync {
    /// Number of columns a row must have.
    fn n_features(&self) -> usize;

    /// Number of classes in the probability output.
    fn n_classes(&self) -> usize;

    /// Class probabilities for one row, indexed by class.
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Most probable class index for one row.
    fn predict(&self, row: &[f64]) -> Result<usize, ModelError> {
        let proba = self.predict_proba(row)?;
        argmax(&proba).ok_or(ModelError::OutputWidth {
            expected: self.n_classes(),
            actual: 0,
        })
    }
}

/// Index of the largest value. Ties go to the lowest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Reject rows whose width does not match the model.
pub fn check_row(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::RowWidth {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}

/// Reject probability vectors of the wrong width or containing NaN/inf.
pub fn check_output(proba: &[f64], expected: usize) -> Result<(), ModelError> {
    if proba.len() != expected {
        return Err(ModelError::OutputWidth {
            expected,
            actual: proba.len(),
        });
    }
    if let Some(class) = proba.iter().position(|p| !p.is_finite()) {
        return Err(ModelError::NonFinite { class });
    }
    Ok(())
}
