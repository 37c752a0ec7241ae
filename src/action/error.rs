//! Action dispatch errors

use crate::cost::CostError;
use crate::sources::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown API path: {path}")]
    UnknownPath { path: String },

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ActionError {
    /// True when the request itself was at fault (bad path or date).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ActionError::UnknownPath { .. } | ActionError::Cost(CostError::DateFormat { .. })
        )
    }
}
