//! AWS Organizations adapter

use super::service_error;
use crate::directory::{AccountPage, AccountStatus, AccountSummary, OrganizationsApi, Tag};
use crate::sources::ServiceError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_organizations::types::Account as OrgAccount;
use aws_sdk_organizations::Client;

pub struct OrganizationsClient {
    client: Client,
}

impl OrganizationsClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn summary_from(account: &OrgAccount) -> Result<AccountSummary, ServiceError> {
    let malformed = |what: &str| ServiceError::message("ListAccounts", format!("account without {}", what));

    let id = account.id().ok_or_else(|| malformed("Id"))?;
    let status = account
        .status()
        .ok_or_else(|| malformed("Status"))?
        .as_str()
        .parse::<AccountStatus>()
        .map_err(|e| ServiceError::message("ListAccounts", e))?;
    let joined = account.joined_timestamp().ok_or_else(|| malformed("JoinedTimestamp"))?;
    let joined_timestamp = chrono::DateTime::from_timestamp(joined.secs(), 0)
        .ok_or_else(|| malformed("valid JoinedTimestamp"))?
        .naive_utc();

    Ok(AccountSummary {
        id: id.to_string(),
        name: account.name().unwrap_or_default().to_string(),
        email: account.email().map(str::to_string),
        status,
        joined_timestamp,
    })
}

#[async_trait]
impl OrganizationsApi for OrganizationsClient {
    async fn list_accounts_page(
        &self,
        next_token: Option<String>,
    ) -> Result<AccountPage, ServiceError> {
        let output = self
            .client
            .list_accounts()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| service_error("ListAccounts", e))?;

        let accounts = output
            .accounts()
            .iter()
            .map(summary_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AccountPage {
            accounts,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn list_tags(&self, account_id: &str) -> Result<Vec<Tag>, ServiceError> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_id(account_id)
            .send()
            .await
            .map_err(|e| service_error("ListTagsForResource", e))?;

        Ok(output
            .tags()
            .iter()
            .map(|tag| Tag::new(tag.key(), tag.value()))
            .collect())
    }
}
