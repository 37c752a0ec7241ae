//! Error types for agent invocations.

use crate::sources::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    /// The agent runtime call or its event stream failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Completion bytes were not valid UTF-8.
    #[error("Agent returned non-UTF-8 completion: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Reading the prompt or writing the answer failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
