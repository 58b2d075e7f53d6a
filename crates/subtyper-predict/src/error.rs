use subtyper_model::ModelError;
use thiserror::Error;

use crate::validate::Field;

#[derive(Debug, Error)]
pub enum PredictError {
    /// A field is missing or not numeric. Which one is not reported.
    #[error("Invalid input data")]
    MalformedInput,

    #[error("{}", .field.message())]
    OutOfRange { field: Field, value: f64 },

    #[error("inference failed: {0}")]
    Inference(#[from] ModelError),
}

impl PredictError {
    /// True for failures caused by the submitted values rather than the model.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PredictError::Inference(_))
    }
}
