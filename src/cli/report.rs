//! Report command handler
//!
//! Each matching account is printed as indented JSON followed by one
//! `Month: <start>, Cost for account <id>: $<amount>` line per cost bucket.

use crate::cli::output::to_json_indented;
use crate::cli::ReportArgs;
use crate::cost::DateRange;
use crate::filter::AccountFilter;
use crate::sources::DataSources;

/// Handle `finops report` command
pub async fn handle_report(
    args: &ReportArgs,
    sources: &DataSources,
) -> Result<String, Box<dyn std::error::Error>> {
    let period = DateRange::month(args.year, args.month)?;
    let accounts = sources.accounts.list_accounts().await?;
    let matching = AccountFilter::from(&args.filter).apply(&accounts);

    tracing::info!(
        period = %period,
        accounts = matching.len(),
        "Building cost report"
    );

    let mut lines = Vec::new();
    for account in &matching {
        lines.push(to_json_indented(account)?);

        let result = sources
            .costs
            .get_cost_for_range(period, Some(account.id.as_str()))
            .await?;
        for bucket in &result.results_by_time {
            lines.push(format!(
                "Month: {}, Cost for account {}: ${}",
                bucket.time_period.start, account.id, bucket.total.unblended_cost.amount
            ));
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{SourceArgs, TagFilterArgs};
    use crate::config::MockConfig;
    use crate::mock::MockProvider;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn args(filter: TagFilterArgs) -> ReportArgs {
        ReportArgs {
            year: 2024,
            month: 9,
            filter,
            source: SourceArgs {
                config: PathBuf::from("finops.toml"),
                mock: true,
                log_level: None,
            },
        }
    }

    #[tokio::test]
    async fn test_report_lines_per_account() {
        let provider = Arc::new(MockProvider::new(&MockConfig {
            seed: Some(8),
            ..Default::default()
        }));
        let sources = DataSources::mock(provider.clone());
        let first = provider.mock_accounts()[0].clone();
        let owner = first.owner().unwrap().to_string();
        let expected_accounts = provider
            .mock_accounts()
            .iter()
            .filter(|a| a.owner() == Some(owner.as_str()))
            .count();

        let output = handle_report(
            &args(TagFilterArgs {
                owner: Some(owner),
                ..Default::default()
            }),
            &sources,
        )
        .await
        .unwrap();

        let cost_lines: Vec<_> = output.lines().filter(|l| l.starts_with("Month: ")).collect();
        assert_eq!(cost_lines.len(), expected_accounts);

        let amount = provider.cache().cost_for(Some(first.id.as_str())).unwrap();
        let expected = format!("Month: 2024-09-01, Cost for account {}: ${}", first.id, amount);
        assert!(cost_lines.contains(&expected.as_str()));
        assert!(output.contains(&format!("    \"Id\": \"{}\"", first.id)));
    }

    #[tokio::test]
    async fn test_report_no_matches_is_empty() {
        let sources = DataSources::mock(Arc::new(MockProvider::new(&Default::default())));

        let output = handle_report(
            &args(TagFilterArgs {
                owner: Some("nobody@nowhere".to_string()),
                ..Default::default()
            }),
            &sources,
        )
        .await
        .unwrap();

        assert!(output.is_empty());
    }
}
