//! Agent invocation types.

use serde::Serialize;
use std::collections::HashMap;
use std::ops::AddAssign;

/// One `InvokeAgent` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub agent_id: String,
    pub agent_alias_id: String,
    pub session_id: String,
    pub input_text: String,
    pub enable_trace: bool,
    pub prompt_session_attributes: HashMap<String, String>,
}

/// A decoded event from the completion stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// Raw completion bytes.
    Chunk(Vec<u8>),
    /// A trace event; `usage` is set when it carries model invocation output
    /// with token counts.
    Trace { usage: Option<TokenUsage> },
    /// Anything else the runtime sends (files, return control, ...).
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// The full answer to one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}
