//! AWS SDK adapters.
//!
//! Thin translations between the SDK clients and the crate's collaborator
//! traits. Credentials come from the default provider chain.

mod agent_runtime;
mod cost_explorer;
mod organizations;

pub use agent_runtime::BedrockAgentClient;
pub use cost_explorer::CostExplorerClient;
pub use organizations::OrganizationsClient;

use crate::config::AwsConfig;
use crate::sources::ServiceError;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_organizations::error::DisplayErrorContext;

/// Load shared SDK configuration, applying the region/profile overrides.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// Wrap an SDK error, keeping the full error chain in the message.
pub(crate) fn service_error<E>(operation: &'static str, err: E) -> ServiceError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    tracing::debug!(operation, error = %message, "AWS call failed");
    ServiceError::with_message(operation, message, err)
}
