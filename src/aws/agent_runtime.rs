//! Bedrock Agent Runtime adapter

use super::service_error;
use crate::agent::{AgentEvent, AgentEventStream, AgentRuntime, InvokeRequest, TokenUsage};
use crate::sources::ServiceError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::types::{
    OrchestrationTrace, ResponseStream, SessionState, Trace, TracePart,
};
use aws_sdk_bedrockagentruntime::Client;
use futures::stream::{self, StreamExt};

pub struct BedrockAgentClient {
    client: Client,
}

impl BedrockAgentClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Token usage from trace → orchestrationTrace → modelInvocationOutput →
/// metadata → usage, when every step is present.
fn usage_from_trace(part: &TracePart) -> Option<TokenUsage> {
    let Some(Trace::OrchestrationTrace(OrchestrationTrace::ModelInvocationOutput(output))) =
        part.trace()
    else {
        return None;
    };

    let usage = output.metadata()?.usage()?;
    Some(TokenUsage::new(
        usage.input_tokens().unwrap_or(0).max(0) as u64,
        usage.output_tokens().unwrap_or(0).max(0) as u64,
    ))
}

fn to_event(event: ResponseStream) -> AgentEvent {
    match event {
        ResponseStream::Chunk(part) => AgentEvent::Chunk(
            part.bytes()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
        ),
        ResponseStream::Trace(part) => AgentEvent::Trace {
            usage: usage_from_trace(&part),
        },
        _ => AgentEvent::Other,
    }
}

#[async_trait]
impl AgentRuntime for BedrockAgentClient {
    async fn invoke(&self, request: InvokeRequest) -> Result<AgentEventStream, ServiceError> {
        let session_state = request
            .prompt_session_attributes
            .into_iter()
            .fold(SessionState::builder(), |builder, (key, value)| {
                builder.prompt_session_attributes(key, value)
            })
            .build();

        let output = self
            .client
            .invoke_agent()
            .agent_id(request.agent_id)
            .agent_alias_id(request.agent_alias_id)
            .session_id(request.session_id)
            .input_text(request.input_text)
            .enable_trace(request.enable_trace)
            .session_state(session_state)
            .send()
            .await
            .map_err(|e| service_error("InvokeAgent", e))?;

        // Ends after the last event or the first stream error
        let events = stream::unfold(Some(output.completion), |receiver| async move {
            let mut receiver = receiver?;
            match receiver.recv().await {
                Ok(Some(event)) => Some((Ok(to_event(event)), Some(receiver))),
                Ok(None) => None,
                Err(e) => Some((Err(service_error("InvokeAgent", e)), None)),
            }
        });

        Ok(events.boxed())
    }
}
