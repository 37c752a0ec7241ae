//! Action-group invocation endpoint.

use super::{ApiError, AppState};
use crate::action::{ActionRequest, ActionResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

/// POST /invoke - Dispatch one action-group event.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected action-group event");
        ApiError::bad_request(&rejection.body_text())
    })?;

    let response = state.dispatcher.handle(&request).await.map_err(|e| {
        tracing::warn!(api_path = %request.api_path, error = %e, "Action group invocation failed");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}
