//! Bedrock agent configuration for the chat REPL

use serde::{Deserialize, Serialize};

/// Alias Bedrock assigns to an agent's working draft
pub const DRAFT_ALIAS_ID: &str = "TSTALIASID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Bedrock agent id; required by `finops chat`
    pub agent_id: String,
    pub agent_alias_id: String,
    /// Request orchestration traces (needed for token usage totals)
    pub enable_trace: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: String::new(),
            agent_alias_id: DRAFT_ALIAS_ID.to_string(),
            enable_trace: true,
        }
    }
}
