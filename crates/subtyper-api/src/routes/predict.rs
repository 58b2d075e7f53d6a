use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use subtyper_core::models::prediction::{PredictionRecord, PredictionResult};
use subtyper_predict::PredictError;

use crate::error::ApiError;
use crate::state::AppState;

/// Classify one set of measurements and record it.
///
/// The body is parsed by hand so that an unparseable body gets the same
/// generic rejection as a missing field.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let raw: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::from(PredictError::MalformedInput))?;

    let prediction = subtyper_predict::run(state.classifier.as_ref(), &raw)?;

    let medications = raw.get("medications").cloned();
    let record = PredictionRecord::new(&prediction.input, &prediction.result, medications);
    let store = state.store.clone();
    let id = record.id;

    // Persistence is best-effort; the client still gets its prediction.
    match tokio::task::spawn_blocking(move || store.insert_prediction(&record)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(id = %id, error = %e, "failed to store prediction"),
        Err(e) => tracing::error!(id = %id, error = %e, "prediction store task failed"),
    }

    Ok(Json(prediction.result))
}
