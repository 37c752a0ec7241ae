//! Configuration module for finops
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`FINOPS_*`, plus the legacy `EnableMock` toggle)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use finops::config::FinopsConfig;
//!
//! // Load defaults
//! let config = FinopsConfig::default();
//! assert!(!config.mock.enabled);
//!
//! // Parse from TOML
//! let toml = r#"
//! [mock]
//! enabled = true
//! "#;
//! let config: FinopsConfig = toml::from_str(toml).unwrap();
//! assert!(config.mock.enabled);
//! ```

pub mod agent;
pub mod aws;
pub mod error;
pub mod logging;
pub mod mock;
pub mod server;

pub use agent::AgentConfig;
pub use aws::AwsConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use mock::MockConfig;
pub use server::ServerConfig;

// Re-export DirectoryConfig from directory module
pub use crate::directory::DirectoryConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable the original Lambda deployment uses to toggle mock data.
pub const LEGACY_MOCK_ENV: &str = "EnableMock";

/// Unified configuration for every `finops` command.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FinopsConfig {
    /// Action-group HTTP server
    pub server: ServerConfig,
    /// AWS region/profile overrides
    pub aws: AwsConfig,
    /// Account directory settings
    pub directory: DirectoryConfig,
    /// Mock data source
    pub mock: MockConfig,
    /// Bedrock agent used by `finops chat`
    pub agent: AgentConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

fn env_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

impl FinopsConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load the file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        // Mock toggle; FINOPS_MOCK wins over the legacy name
        if let Ok(mock) = std::env::var(LEGACY_MOCK_ENV) {
            self.mock.enabled = env_flag(&mock);
        }
        if let Ok(mock) = std::env::var("FINOPS_MOCK") {
            self.mock.enabled = env_flag(&mock);
        }
        if let Ok(seed) = std::env::var("FINOPS_MOCK_SEED") {
            if let Ok(s) = seed.parse() {
                self.mock.seed = Some(s);
            }
        }

        // Server settings
        if let Ok(port) = std::env::var("FINOPS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("FINOPS_HOST") {
            self.server.host = host;
        }

        // AWS
        if let Ok(region) = std::env::var("FINOPS_AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Ok(profile) = std::env::var("FINOPS_AWS_PROFILE") {
            self.aws.profile = Some(profile);
        }

        // Agent
        if let Ok(agent_id) = std::env::var("FINOPS_AGENT_ID") {
            self.agent.agent_id = agent_id;
        }
        if let Ok(alias) = std::env::var("FINOPS_AGENT_ALIAS_ID") {
            self.agent.agent_alias_id = alias;
        }

        // Logging settings
        if let Ok(level) = std::env::var("FINOPS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FINOPS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.mock.account_count == 0 || self.mock.account_count > 99 {
            return Err(ConfigError::Validation {
                field: "mock.account_count".to_string(),
                message: "must be between 1 and 99".to_string(),
            });
        }

        if self.agent.agent_alias_id.is_empty() {
            return Err(ConfigError::Validation {
                field: "agent.agent_alias_id".to_string(),
                message: "alias id cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
