//! Upstream service failure

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An account, billing or agent call failed.
///
/// Carries the upstream error unchanged as its source; nothing is retried.
#[derive(Error, Debug)]
#[error("{operation} failed: {message}")]
pub struct ServiceError {
    operation: &'static str,
    message: String,
    #[source]
    source: BoxError,
}

impl ServiceError {
    /// Wrap an upstream error, using its `Display` output as the message.
    pub fn new<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            operation,
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// Wrap an upstream error with a more descriptive message than its `Display`.
    pub fn with_message<E>(operation: &'static str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            operation,
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Failure with no underlying error value (e.g. a malformed upstream response).
    pub fn message(operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            operation,
            source: message.clone().into(),
            message,
        }
    }

    /// Name of the API operation that failed (e.g. `ListAccounts`).
    pub fn operation(&self) -> &str {
        self.operation
    }
}
