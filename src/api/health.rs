//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// `mock` or `aws`
    pub data_source: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health - Liveness; never calls AWS.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let data_source = if state.dispatcher.sources().is_mock() {
        "mock"
    } else {
        "aws"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        data_source: data_source.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
