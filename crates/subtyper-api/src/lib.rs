//! subtyper-api
//!
//! HTTP surface of the subtype service: the prediction endpoint, record
//! listing, medication-change submissions, and the frontend's static files.
//! The binary wires configuration and logging around [`router`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use state::AppState;

/// Build the full application router.
///
/// Paths not claimed by an API route are served from `state.static_dir`,
/// falling back to its `index.html` so client-side routes resolve.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .route("/predictions", get(routes::predictions::list_predictions))
        .route("/predictions/{id}", get(routes::predictions::get_prediction))
        .route(
            "/medications",
            get(routes::medications::list_medication_changes)
                .post(routes::medications::create_medication_change),
        )
        .fallback_service(frontend)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
