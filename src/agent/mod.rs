//! Bedrock agent driver.
//!
//! Sends prompts to a conversational agent, collects the streamed completion
//! and the token usage reported in orchestration traces, and runs the
//! interactive prompt loop behind `finops chat`.

pub mod error;
mod repl;
mod session;
pub mod types;

pub use error::AgentError;
pub use repl::{run_repl, EXIT_COMMAND, EXIT_MESSAGE, PROMPT};
pub use session::{generate_session_id, AgentSession, CURRENT_DATE_ATTRIBUTE, SESSION_ID_DIGITS};
pub use types::{AgentEvent, Completion, InvokeRequest, TokenUsage};

use crate::sources::ServiceError;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

/// Events from one agent invocation, in arrival order.
pub type AgentEventStream = BoxStream<'static, Result<AgentEvent, ServiceError>>;

/// The agent runtime a session talks to.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Start an invocation and return its event stream.
    async fn invoke(&self, request: InvokeRequest) -> Result<AgentEventStream, ServiceError>;
}

/// Drain an event stream into the completion text and summed token usage.
///
/// Chunks are concatenated as bytes and decoded once at the end, so a
/// multi-byte character split across chunks survives.
pub async fn collect_completion(mut events: AgentEventStream) -> Result<Completion, AgentError> {
    let mut bytes = Vec::new();
    let mut usage = TokenUsage::default();

    while let Some(event) = events.next().await {
        match event? {
            AgentEvent::Chunk(chunk) => bytes.extend_from_slice(&chunk),
            AgentEvent::Trace { usage: Some(u) } => usage += u,
            AgentEvent::Trace { usage: None } | AgentEvent::Other => {}
        }
    }

    Ok(Completion {
        text: String::from_utf8(bytes)?,
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn events(items: Vec<Result<AgentEvent, ServiceError>>) -> AgentEventStream {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_collect_concatenates_chunks_and_sums_usage() {
        let stream = events(vec![
            Ok(AgentEvent::Trace {
                usage: Some(TokenUsage::new(120, 15)),
            }),
            Ok(AgentEvent::Chunk(b"Total cost ".to_vec())),
            Ok(AgentEvent::Trace { usage: None }),
            Ok(AgentEvent::Other),
            Ok(AgentEvent::Chunk(b"is $42.17".to_vec())),
            Ok(AgentEvent::Trace {
                usage: Some(TokenUsage::new(300, 40)),
            }),
        ]);

        let completion = collect_completion(stream).await.unwrap();

        assert_eq!(completion.text, "Total cost is $42.17");
        assert_eq!(completion.usage, TokenUsage::new(420, 55));
    }

    #[tokio::test]
    async fn test_collect_joins_split_utf8() {
        let euro = "€".as_bytes();
        let stream = events(vec![
            Ok(AgentEvent::Chunk(euro[..1].to_vec())),
            Ok(AgentEvent::Chunk(euro[1..].to_vec())),
        ]);

        let completion = collect_completion(stream).await.unwrap();

        assert_eq!(completion.text, "€");
    }

    #[tokio::test]
    async fn test_collect_rejects_invalid_utf8() {
        let stream = events(vec![Ok(AgentEvent::Chunk(vec![0xff, 0xfe]))]);

        let err = collect_completion(stream).await.unwrap_err();

        assert!(matches!(err, AgentError::Decode(_)));
    }

    #[tokio::test]
    async fn test_collect_propagates_stream_error() {
        let stream = events(vec![
            Ok(AgentEvent::Chunk(b"partial".to_vec())),
            Err(ServiceError::message("InvokeAgent", "throttlingException")),
        ]);

        let err = collect_completion(stream).await.unwrap_err();

        assert!(matches!(err, AgentError::Service(_)));
    }
}
