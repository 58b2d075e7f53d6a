use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use subtyper_core::models::medication::{MedicationChange, NewMedicationChange};
use subtyper_storage::StorageError;

use super::ListParams;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_medication_change(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MedicationChange>, ApiError> {
    let request: NewMedicationChange = serde_json::from_slice(&body)?;
    let change = MedicationChange::new(request);

    let stored = tokio::task::spawn_blocking(move || {
        if let Some(prediction_id) = change.prediction_id {
            state.store.get_prediction(prediction_id)?;
        }
        state.store.insert_medication_change(&change)?;
        Ok::<_, StorageError>(change)
    })
    .await??;

    Ok(Json(stored))
}

pub async fn list_medication_changes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<MedicationChange>>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit();
    let changes =
        tokio::task::spawn_blocking(move || state.store.list_medication_changes(limit)).await??;
    Ok(Json(changes))
}
