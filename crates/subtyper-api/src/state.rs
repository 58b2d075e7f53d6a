use std::path::PathBuf;
use std::sync::Arc;

use subtyper_model::Classifier;
use subtyper_storage::Store;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub classifier: Arc<dyn Classifier>,
    pub store: Arc<Store>,
    /// Prebuilt frontend served for every path no API route claims.
    pub static_dir: PathBuf,
}
