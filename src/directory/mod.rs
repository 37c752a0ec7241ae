//! Account directory.
//!
//! Lists every account in the AWS organization together with its tags.
//! Pagination and per-account tag lookups go through [`OrganizationsApi`],
//! so the reader works the same against AWS and against test doubles.

mod account;

pub use account::*;

use crate::sources::ServiceError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which account tags make it into the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Keep every tag on the account
    #[default]
    All,
    /// Keep only Department, Owner and Environment
    Standard,
}

impl TagPolicy {
    pub const STANDARD_KEYS: [&'static str; 3] = [TAG_DEPARTMENT, TAG_OWNER, TAG_ENVIRONMENT];

    pub fn includes(&self, key: &str) -> bool {
        match self {
            TagPolicy::All => true,
            TagPolicy::Standard => Self::STANDARD_KEYS.contains(&key),
        }
    }
}

/// Directory settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub tag_policy: TagPolicy,
}

/// One account as returned by `ListAccounts`, before tags are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub status: AccountStatus,
    pub joined_timestamp: NaiveDateTime,
}

/// One page of `ListAccounts` results.
#[derive(Debug, Clone, Default)]
pub struct AccountPage {
    pub accounts: Vec<AccountSummary>,
    /// Continuation token; `None` on the last page
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// AWS Organizations operations the directory depends on.
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// Fetch one page of accounts, starting at `next_token` (first page when `None`).
    async fn list_accounts_page(&self, next_token: Option<String>)
        -> Result<AccountPage, ServiceError>;

    /// Fetch the tags attached to an account.
    async fn list_tags(&self, account_id: &str) -> Result<Vec<Tag>, ServiceError>;
}

/// Anything that can produce the full account list (AWS or mock).
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError>;
}

/// Reads the organization's accounts through an [`OrganizationsApi`].
pub struct DirectoryReader<O> {
    api: O,
    tag_policy: TagPolicy,
}

impl<O: OrganizationsApi> DirectoryReader<O> {
    pub fn new(api: O, tag_policy: TagPolicy) -> Self {
        Self { api, tag_policy }
    }

    pub fn tag_policy(&self) -> TagPolicy {
        self.tag_policy
    }

    async fn with_tags(&self, summary: AccountSummary) -> Result<Account, ServiceError> {
        let tags: BTreeMap<String, String> = self
            .api
            .list_tags(&summary.id)
            .await?
            .into_iter()
            .filter(|tag| self.tag_policy.includes(&tag.key))
            .map(|tag| (tag.key, tag.value))
            .collect();

        Ok(Account {
            id: summary.id,
            name: summary.name,
            email: summary.email,
            status: summary.status,
            joined_timestamp: summary.joined_timestamp,
            tags,
        })
    }
}

#[async_trait]
impl<O: OrganizationsApi> AccountDirectory for DirectoryReader<O> {
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        let mut accounts = Vec::new();
        let mut next_token = None;
        let mut pages = 0usize;

        loop {
            let page = self.api.list_accounts_page(next_token.take()).await?;
            pages += 1;

            for summary in page.accounts {
                accounts.push(self.with_tags(summary).await?);
            }

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            accounts = accounts.len(),
            pages,
            tag_policy = ?self.tag_policy,
            "Listed organization accounts"
        );
        Ok(accounts)
    }
}
