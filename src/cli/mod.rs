//! CLI module for finops
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `accounts` - List organization accounts, optionally filtered by tag
//! - `costs` - Monthly unblended cost (credits excluded)
//! - `report` - Per-account cost report for one month
//! - `invoke` - Run one action-group event through the dispatcher
//! - `serve` - Serve the action group over HTTP
//! - `chat` - Talk to the Bedrock agent
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Accounts owned by one person, from generated data
//! finops accounts --owner alice.johnson@examplecorp.com --mock
//!
//! # September 2024 cost of one linked account
//! finops costs --month 2024-09 --account 123456789012
//!
//! # Generate shell completions
//! finops completions bash > ~/.bash_completion.d/finops
//! ```

pub mod accounts;
pub mod chat;
pub mod completions;
pub mod config;
pub mod costs;
pub mod invoke;
pub mod output;
pub mod report;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::FinopsConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// finops - AWS organization cost queries for Bedrock agents
#[derive(Parser, Debug)]
#[command(
    name = "finops",
    version,
    about = "AWS organization account and cost queries, served as a Bedrock Agents action group"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List organization accounts and their tags
    Accounts(AccountsArgs),
    /// Show monthly unblended cost, credits excluded
    Costs(CostsArgs),
    /// Print matching accounts with their cost for one month
    Report(ReportArgs),
    /// Dispatch one action-group event and print the response
    Invoke(InvokeArgs),
    /// Serve the action group over HTTP
    Serve(ServeArgs),
    /// Chat with the Bedrock agent
    Chat(ChatArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that reads accounts or costs.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "finops.toml")]
    pub config: PathBuf,

    /// Use generated accounts and costs instead of AWS
    #[arg(long)]
    pub mock: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FINOPS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Tag criteria; each one must match exactly.
#[derive(Args, Debug, Clone, Default)]
pub struct TagFilterArgs {
    /// Keep accounts whose Owner tag equals this value
    #[arg(long)]
    pub owner: Option<String>,

    /// Keep accounts whose Environment tag equals this value
    #[arg(long)]
    pub environment: Option<String>,

    /// Keep accounts whose Department tag equals this value
    #[arg(long)]
    pub department: Option<String>,
}

#[derive(Args, Debug)]
pub struct AccountsArgs {
    #[command(flatten)]
    pub filter: TagFilterArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct CostsArgs {
    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long, required_unless_present = "month", conflicts_with = "month")]
    pub start: Option<String>,

    /// Last day, exclusive (YYYY-MM-DD)
    #[arg(long, required_unless_present = "month", conflicts_with = "month")]
    pub end: Option<String>,

    /// Whole calendar month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,

    /// Restrict to one linked account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report year
    #[arg(long)]
    pub year: i32,

    /// Report month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    #[command(flatten)]
    pub filter: TagFilterArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Event file; `-` or omitted reads stdin
    #[arg(short, long)]
    pub event: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override server port
    #[arg(short, long, env = "FINOPS_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "FINOPS_HOST")]
    pub host: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Bedrock agent id
    #[arg(long, env = "FINOPS_AGENT_ID")]
    pub agent_id: Option<String>,

    /// Bedrock agent alias id
    #[arg(long, env = "FINOPS_AGENT_ALIAS_ID")]
    pub agent_alias_id: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "finops.toml")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FINOPS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "finops.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration with CLI overrides
///
/// File (if present), then `FINOPS_*` environment, then flags; validated.
pub fn load_config(args: &SourceArgs) -> Result<FinopsConfig, Box<dyn std::error::Error>> {
    let mut config = FinopsConfig::load_or_default(&args.config)?.with_env_overrides();

    if args.mock {
        config.mock.enabled = true;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}
