//! # Action Group HTTP Wrapper
//!
//! Serves the action dispatcher over HTTP, standing in for the Lambda entry
//! point when running locally or behind a proxy.
//!
//! ## Endpoints
//!
//! - `POST /invoke` - Action-group event in, response envelope out
//! - `GET /health` - Liveness and data source mode
//!
//! ## Example
//!
//! ```no_run
//! use finops::action::ActionDispatcher;
//! use finops::api::{create_router, AppState};
//! use finops::config::FinopsConfig;
//! use finops::sources::DataSources;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(FinopsConfig::default());
//! let dispatcher = ActionDispatcher::new(DataSources::from_config(&config).await);
//!
//! let app = create_router(Arc::new(AppState::new(dispatcher, config)));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Failures are returned as `{"error": {"message", "type", "code"}}` with
//! 400 for unknown paths and malformed dates, 502 when AWS fails.

mod error;
mod health;
mod invoke;

pub use error::{ApiError, ApiErrorBody};
pub use health::HealthResponse;

use crate::action::ActionDispatcher;
use crate::config::FinopsConfig;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB); agent events are small.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub dispatcher: ActionDispatcher,
    pub config: Arc<FinopsConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dispatcher: ActionDispatcher, config: Arc<FinopsConfig>) -> Self {
        Self {
            dispatcher,
            config,
            start_time: Instant::now(),
        }
    }
}

/// Create the API router with all endpoints and layers configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/invoke", post(invoke::handle))
        .route("/health", get(health::handle))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}
