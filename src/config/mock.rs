//! Mock data configuration

use serde::{Deserialize, Serialize};

/// Number of synthetic accounts generated by default
pub const DEFAULT_MOCK_ACCOUNTS: usize = 10;

/// Mock data source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Serve generated data instead of calling AWS
    pub enabled: bool,
    /// RNG seed for reproducible mock output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of accounts in the generated organization
    pub account_count: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            seed: None,
            account_count: DEFAULT_MOCK_ACCOUNTS,
        }
    }
}
