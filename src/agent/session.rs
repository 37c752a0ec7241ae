//! One conversation with a Bedrock agent.

use super::{collect_completion, AgentError, AgentRuntime, Completion, InvokeRequest};
use crate::config::AgentConfig;
use chrono::{Local, NaiveDate};
use rand::Rng;
use std::collections::HashMap;

/// Prompt session attribute carrying today's date, so the agent can resolve
/// "last month" and similar phrases.
pub const CURRENT_DATE_ATTRIBUTE: &str = "CURRENT_DATE";

pub const SESSION_ID_DIGITS: usize = 12;

/// Random numeric session id.
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    (0..SESSION_ID_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Agent, alias and session id shared by every prompt of one REPL run.
pub struct AgentSession<R> {
    runtime: R,
    agent_id: String,
    agent_alias_id: String,
    session_id: String,
    enable_trace: bool,
}

impl<R: AgentRuntime> AgentSession<R> {
    pub fn new(runtime: R, config: &AgentConfig) -> Self {
        Self {
            runtime,
            agent_id: config.agent_id.clone(),
            agent_alias_id: config.agent_alias_id.clone(),
            session_id: generate_session_id(),
            enable_trace: config.enable_trace,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Send a prompt dated today (local time).
    pub async fn invoke(&self, prompt: &str) -> Result<Completion, AgentError> {
        self.invoke_on(prompt, Local::now().date_naive()).await
    }

    /// Send a prompt with an explicit `CURRENT_DATE`.
    pub async fn invoke_on(&self, prompt: &str, today: NaiveDate) -> Result<Completion, AgentError> {
        let request = InvokeRequest {
            agent_id: self.agent_id.clone(),
            agent_alias_id: self.agent_alias_id.clone(),
            session_id: self.session_id.clone(),
            input_text: prompt.to_string(),
            enable_trace: self.enable_trace,
            prompt_session_attributes: HashMap::from([(
                CURRENT_DATE_ATTRIBUTE.to_string(),
                today.format("%Y-%m-%d").to_string(),
            )]),
        };

        tracing::debug!(
            agent_id = %request.agent_id,
            session_id = %request.session_id,
            "Invoking agent"
        );

        let result = match self.runtime.invoke(request).await {
            Ok(events) => collect_completion(events).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Couldn't invoke agent");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentEvent, AgentEventStream, TokenUsage};
    use crate::sources::ServiceError;
    use async_trait::async_trait;
    use futures::{stream, StreamExt};
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoRuntime {
        requests: Mutex<Vec<InvokeRequest>>,
    }

    #[async_trait]
    impl AgentRuntime for EchoRuntime {
        async fn invoke(&self, request: InvokeRequest) -> Result<AgentEventStream, ServiceError> {
            let reply = format!("echo: {}", request.input_text);
            self.requests.lock().unwrap().push(request);
            Ok(stream::iter(vec![
                Ok(AgentEvent::Chunk(reply.into_bytes())),
                Ok(AgentEvent::Trace {
                    usage: Some(TokenUsage::new(10, 2)),
                }),
            ])
            .boxed())
        }
    }

    struct RejectingRuntime;

    #[async_trait]
    impl AgentRuntime for RejectingRuntime {
        async fn invoke(&self, _: InvokeRequest) -> Result<AgentEventStream, ServiceError> {
            Err(ServiceError::message("InvokeAgent", "ResourceNotFoundException"))
        }
    }

    fn config() -> AgentConfig {
        AgentConfig {
            agent_id: "AGENT123".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_id_is_twelve_digits() {
        let id = generate_session_id();
        assert_eq!(id.len(), SESSION_ID_DIGITS);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_invoke_builds_request() {
        let session = AgentSession::new(EchoRuntime::default(), &config()).with_session_id("000000000042");
        let today = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();

        let completion = session.invoke_on("costs for august", today).await.unwrap();

        assert_eq!(completion.text, "echo: costs for august");
        assert_eq!(completion.usage, TokenUsage::new(10, 2));

        let requests = session.runtime.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.agent_id, "AGENT123");
        assert_eq!(request.agent_alias_id, "TSTALIASID");
        assert_eq!(request.session_id, "000000000042");
        assert!(request.enable_trace);
        assert_eq!(
            request.prompt_session_attributes.get(CURRENT_DATE_ATTRIBUTE).map(String::as_str),
            Some("2024-09-03")
        );
    }

    #[tokio::test]
    async fn test_session_id_stable_across_prompts() {
        let session = AgentSession::new(EchoRuntime::default(), &config());

        session.invoke("one").await.unwrap();
        session.invoke("two").await.unwrap();

        let requests = session.runtime.requests.lock().unwrap();
        assert_eq!(requests[0].session_id, requests[1].session_id);
        assert_eq!(requests[0].session_id, session.session_id());
    }

    #[tokio::test]
    async fn test_invoke_failure_propagates() {
        let session = AgentSession::new(RejectingRuntime, &config());

        let err = session.invoke("hello").await.unwrap_err();

        assert!(err.to_string().contains("ResourceNotFoundException"));
    }
}
