use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use subtyper_core::models::prediction::PredictionRecord;

use super::ListParams;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_predictions(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<PredictionRecord>>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit();
    let records =
        tokio::task::spawn_blocking(move || state.store.list_predictions(limit)).await??;
    Ok(Json(records))
}

pub async fn get_prediction(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PredictionRecord>, ApiError> {
    let Path(id) = id?;
    let record = tokio::task::spawn_blocking(move || state.store.get_prediction(id)).await??;
    Ok(Json(record))
}
