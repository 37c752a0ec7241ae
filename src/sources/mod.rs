//! Data source selection.
//!
//! Decides once, at startup, whether accounts and costs come from AWS or
//! from the [`MockProvider`](crate::mock::MockProvider).

mod error;

pub use error::{BoxError, ServiceError};

use crate::aws::{self, CostExplorerClient, OrganizationsClient};
use crate::config::FinopsConfig;
use crate::cost::{CostEngine, CostExplorerApi};
use crate::directory::{AccountDirectory, DirectoryReader};
use crate::mock::MockProvider;
use std::sync::Arc;

/// The account directory and cost engine every command works against.
#[derive(Clone)]
pub struct DataSources {
    pub accounts: Arc<dyn AccountDirectory>,
    pub costs: CostEngine,
    mock: Option<Arc<MockProvider>>,
}

impl DataSources {
    pub fn new(accounts: Arc<dyn AccountDirectory>, cost_api: Arc<dyn CostExplorerApi>) -> Self {
        Self {
            accounts,
            costs: CostEngine::new(cost_api),
            mock: None,
        }
    }

    /// Serve both accounts and costs from one mock provider.
    pub fn mock(provider: Arc<MockProvider>) -> Self {
        Self {
            accounts: provider.clone(),
            costs: CostEngine::new(provider.clone()),
            mock: Some(provider),
        }
    }

    /// Mock or AWS-backed sources, per `config.mock.enabled`.
    pub async fn from_config(config: &FinopsConfig) -> Self {
        if config.mock.enabled {
            tracing::info!(seed = ?config.mock.seed, "Using mock account and cost data");
            return Self::mock(Arc::new(MockProvider::new(&config.mock)));
        }

        let sdk_config = aws::load_sdk_config(&config.aws).await;
        tracing::info!(
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            tag_policy = ?config.directory.tag_policy,
            "Using AWS Organizations and Cost Explorer"
        );

        Self::new(
            Arc::new(DirectoryReader::new(
                OrganizationsClient::new(&sdk_config),
                config.directory.tag_policy,
            )),
            Arc::new(CostExplorerClient::new(&sdk_config)),
        )
    }

    pub fn is_mock(&self) -> bool {
        self.mock.is_some()
    }

    /// The mock provider, when mock mode is on.
    pub fn mock_provider(&self) -> Option<&Arc<MockProvider>> {
        self.mock.as_ref()
    }
}
