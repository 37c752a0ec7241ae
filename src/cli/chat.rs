//! Chat command implementation

use crate::agent::{run_repl, AgentSession};
use crate::aws::{self, BedrockAgentClient};
use crate::cli::ChatArgs;
use crate::config::FinopsConfig;
use crate::logging::init_tracing;
use tokio::io::BufReader;

/// Resolve the agent settings: file, then environment, then flags.
pub fn load_chat_config(args: &ChatArgs) -> Result<FinopsConfig, Box<dyn std::error::Error>> {
    let mut config = FinopsConfig::load_or_default(&args.config)?.with_env_overrides();

    if let Some(ref agent_id) = args.agent_id {
        config.agent.agent_id = agent_id.clone();
    }
    if let Some(ref alias) = args.agent_alias_id {
        config.agent.agent_alias_id = alias.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    if config.agent.agent_id.is_empty() {
        return Err(
            "No agent id configured: set [agent] agent_id, FINOPS_AGENT_ID or --agent-id".into(),
        );
    }

    Ok(config)
}

/// Main chat command handler
pub async fn run_chat(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_chat_config(&args)?;
    init_tracing(&config.logging)?;

    let sdk_config = aws::load_sdk_config(&config.aws).await;
    let session = AgentSession::new(BedrockAgentClient::new(&sdk_config), &config.agent);

    tracing::info!(
        agent_id = %config.agent.agent_id,
        agent_alias_id = %config.agent.agent_alias_id,
        session_id = %session.session_id(),
        "Starting agent session"
    );

    run_repl(
        &session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;
    Ok(())
}
