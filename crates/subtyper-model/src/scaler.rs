use crate::artifact::ScalerSchema;
use crate::error::ModelError;

/// Per-column standardisation, `(x - mean) / scale`.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn from_schema(schema: &ScalerSchema, n_features: usize) -> Result<Self, ModelError> {
        if schema.mean.len() != n_features || schema.scale.len() != n_features {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler has {} means and {} scales for {n_features} features",
                schema.mean.len(),
                schema.scale.len(),
            )));
        }
        if let Some(i) = schema
            .scale
            .iter()
            .position(|s| *s == 0.0 || !s.is_finite())
        {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler scale for feature {i} must be finite and non-zero"
            )));
        }
        if schema.mean.iter().any(|m| !m.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "scaler means must be finite".to_string(),
            ));
        }

        Ok(Self {
            mean: schema.mean.clone(),
            scale: schema.scale.clone(),
        })
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}
