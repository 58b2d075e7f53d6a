use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown cluster label: {0}")]
    UnknownCluster(String),

    #[error("class index {index} has no cluster label")]
    UnknownClassIndex { index: usize },
}
