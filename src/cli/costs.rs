//! Costs command handler

use crate::cli::output::{format_costs_json, format_costs_table};
use crate::cli::CostsArgs;
use crate::cost::{CostError, DateRange};
use crate::sources::DataSources;

/// Parse `YYYY-MM` into the month's date range.
pub fn parse_month(value: &str) -> Result<DateRange, CostError> {
    let invalid = || CostError::DateFormat {
        value: value.to_string(),
    };

    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    DateRange::month(year, month).map_err(|_| invalid())
}

/// Handle `finops costs` command
pub async fn handle_costs(
    args: &CostsArgs,
    sources: &DataSources,
) -> Result<String, Box<dyn std::error::Error>> {
    let account_id = args.account.as_deref();

    let result = match (&args.month, &args.start, &args.end) {
        (Some(month), _, _) => {
            let period = parse_month(month)?;
            sources.costs.get_cost_for_range(period, account_id).await?
        }
        (None, Some(start), Some(end)) => sources.costs.get_cost(start, end, account_id).await?,
        _ => return Err("Either --month or both --start and --end are required".into()),
    };

    if args.json {
        return Ok(format_costs_json(&result)?);
    }

    Ok(format_costs_table(
        &result,
        account_id.filter(|id| !id.is_empty()),
    ))
}
