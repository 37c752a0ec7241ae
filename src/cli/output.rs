//! Output formatting helpers for CLI commands

use crate::cost::{CostResult, USD};
use crate::directory::{Account, AccountStatus, TAG_DEPARTMENT, TAG_ENVIRONMENT, TAG_OWNER};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

/// Pretty JSON with four-space indentation, as the report script printed it.
pub fn to_json_indented<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn status_cell(status: AccountStatus) -> String {
    match status {
        AccountStatus::Active => status.as_str().green().to_string(),
        AccountStatus::Suspended => status.as_str().red().to_string(),
        AccountStatus::Pending | AccountStatus::PendingClosure => {
            status.as_str().yellow().to_string()
        }
    }
}

/// Format accounts as a table
pub fn format_accounts_table(accounts: &[Account]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id",
        "Name",
        "Status",
        "Joined",
        "Owner",
        "Environment",
        "Department",
    ]);

    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.id),
            Cell::new(&account.name),
            Cell::new(status_cell(account.status)),
            Cell::new(account.joined_timestamp.format("%Y-%m-%d")),
            Cell::new(account.tag(TAG_OWNER).unwrap_or("-")),
            Cell::new(account.tag(TAG_ENVIRONMENT).unwrap_or("-")),
            Cell::new(account.tag(TAG_DEPARTMENT).unwrap_or("-")),
        ]);
    }

    table.to_string()
}

/// Format accounts as JSON
pub fn format_accounts_json(accounts: &[Account]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(accounts)
}

/// Format a cost result as a table with a total row
pub fn format_costs_table(result: &CostResult, account_id: Option<&str>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Start", "End", "Account", "Amount", "Unit"]);

    let scope = account_id.unwrap_or("all");
    for bucket in &result.results_by_time {
        let cost = &bucket.total.unblended_cost;
        table.add_row(vec![
            Cell::new(&bucket.time_period.start),
            Cell::new(&bucket.time_period.end),
            Cell::new(scope),
            Cell::new(format_amount(&cost.amount)),
            Cell::new(&cost.unit),
        ]);
    }

    let total = match result.total() {
        Some(total) => total.round_dp(2).to_string(),
        None => "n/a".to_string(),
    };
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(total.bold()),
        Cell::new(USD),
    ]);

    table.to_string()
}

/// Round to cents when the amount is numeric
fn format_amount(amount: &str) -> String {
    amount
        .parse::<Decimal>()
        .map(|d| d.round_dp(2).to_string())
        .unwrap_or_else(|_| amount.to_string())
}

/// Format a cost result as JSON (`{"ResultsByTime": [...]}`)
pub fn format_costs_json(result: &CostResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
