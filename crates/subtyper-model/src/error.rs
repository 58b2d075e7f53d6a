use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature schema mismatch (expected {expected:?}, got {actual:?})")]
    FeatureSchema {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("class schema mismatch (expected {expected:?}, got {actual:?})")]
    ClassSchema {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("feature row has {actual} values, model expects {expected}")]
    RowWidth { expected: usize, actual: usize },

    #[error("model produced {actual} probabilities, expected {expected}")]
    OutputWidth { expected: usize, actual: usize },

    #[error("model produced a non-finite probability for class {class}")]
    NonFinite { class: usize },

    #[error("model predicted class {index}, which has no label")]
    UnknownClass { index: usize },
}
