use std::sync::Arc;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use subtyper_api::config::{Config, Database};
use subtyper_api::state::AppState;
use subtyper_storage::Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    // No model, no service.
    let model = subtyper_model::load(&config.model_path)
        .wrap_err_with(|| format!("loading classifier from {}", config.model_path.display()))?;

    let store = match &config.database {
        Database::Memory => {
            tracing::warn!("using in-memory database; records are lost on exit");
            Store::in_memory()?
        }
        Database::File(path) => Store::open(path)
            .wrap_err_with(|| format!("opening database {}", path.display()))?,
    };

    if !config.static_dir.is_dir() {
        tracing::warn!(
            dir = %config.static_dir.display(),
            "frontend build directory not found; static routes will 404"
        );
    }

    let state = AppState {
        classifier: Arc::new(model),
        store: Arc::new(store),
        static_dir: config.static_dir.clone(),
    };

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .wrap_err_with(|| format!("binding {}", config.addr()))?;
    tracing::info!(addr = %config.addr(), "listening");

    axum::serve(listener, subtyper_api::router(state))
        .await
        .wrap_err("server error")
}
