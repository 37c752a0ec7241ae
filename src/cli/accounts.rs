//! Accounts command handler

use crate::cli::output::{format_accounts_json, format_accounts_table};
use crate::cli::{AccountsArgs, TagFilterArgs};
use crate::filter::AccountFilter;
use crate::sources::DataSources;

impl From<&TagFilterArgs> for AccountFilter {
    fn from(args: &TagFilterArgs) -> Self {
        AccountFilter {
            owner: args.owner.clone(),
            environment: args.environment.clone(),
            department: args.department.clone(),
        }
    }
}

/// Handle `finops accounts` command
pub async fn handle_accounts(
    args: &AccountsArgs,
    sources: &DataSources,
) -> Result<String, Box<dyn std::error::Error>> {
    let accounts = sources.accounts.list_accounts().await?;
    let filter = AccountFilter::from(&args.filter);
    let matching = filter.apply(&accounts);

    tracing::debug!(
        total = accounts.len(),
        matching = matching.len(),
        "Filtered accounts"
    );

    if args.json {
        return Ok(format_accounts_json(&matching)?);
    }

    if matching.is_empty() {
        return Ok("No accounts found".to_string());
    }

    Ok(format_accounts_table(&matching))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SourceArgs;
    use crate::config::MockConfig;
    use crate::directory::Account;
    use crate::mock::MockProvider;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn sources() -> DataSources {
        DataSources::mock(Arc::new(MockProvider::new(&MockConfig {
            seed: Some(21),
            ..Default::default()
        })))
    }

    fn args(filter: TagFilterArgs, json: bool) -> AccountsArgs {
        AccountsArgs {
            filter,
            json,
            source: SourceArgs {
                config: PathBuf::from("finops.toml"),
                mock: true,
                log_level: None,
            },
        }
    }

    #[tokio::test]
    async fn test_accounts_json_lists_everything() {
        let sources = sources();

        let output = handle_accounts(&args(TagFilterArgs::default(), true), &sources)
            .await
            .unwrap();

        let accounts: Vec<Account> = serde_json::from_str(&output).unwrap();
        assert_eq!(accounts.len(), 10);
    }

    #[tokio::test]
    async fn test_accounts_owner_filter() {
        let sources = sources();
        let all = sources.accounts.list_accounts().await.unwrap();
        let owner = all[0].owner().unwrap().to_string();

        let filter = TagFilterArgs {
            owner: Some(owner.clone()),
            ..Default::default()
        };
        let output = handle_accounts(&args(filter, true), &sources).await.unwrap();

        let accounts: Vec<Account> = serde_json::from_str(&output).unwrap();
        assert!(!accounts.is_empty());
        assert!(accounts.iter().all(|a| a.owner() == Some(owner.as_str())));
    }

    #[tokio::test]
    async fn test_accounts_no_match_message() {
        let filter = TagFilterArgs {
            department: Some("Marketing".to_string()),
            ..Default::default()
        };

        let output = handle_accounts(&args(filter, false), &sources()).await.unwrap();

        assert_eq!(output, "No accounts found");
    }
}
