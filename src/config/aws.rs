//! AWS client configuration

use serde::{Deserialize, Serialize};

/// Settings applied on top of the SDK's default provider chain.
///
/// Unset fields fall through to the usual `AWS_REGION` / `AWS_PROFILE`
/// environment and shared config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}
