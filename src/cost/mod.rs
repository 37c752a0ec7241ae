//! Cost query engine.
//!
//! Monthly unblended cost for the whole organization or one linked account,
//! always excluding credits. Dates are normalized before any collaborator
//! (Cost Explorer or the mock provider) sees them.

mod error;
pub mod filter;
mod types;

pub use error::CostError;
pub use filter::{Dimension, DimensionValues, FilterExpression, CREDIT_RECORD_TYPE};
pub use types::*;

use crate::sources::ServiceError;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Canonical date format for every cost query
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date. Unpadded month/day (`2024-9-1`) is accepted.
pub fn parse_date(value: &str) -> Result<NaiveDate, CostError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| CostError::DateFormat {
        value: value.to_string(),
    })
}

/// Parse and re-format a date into canonical `YYYY-MM-DD` form.
pub fn normalize_date(value: &str) -> Result<String, CostError> {
    parse_date(value).map(|d| d.format(DATE_FORMAT).to_string())
}

/// Query window; `end` is exclusive, as in Cost Explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, CostError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// The whole calendar month: first of `month` up to first of the next
    /// month (December rolls over into January of `year + 1`).
    pub fn month(year: i32, month: u32) -> Result<Self, CostError> {
        let invalid = || CostError::DateFormat {
            value: format!("{}-{:02}", year, month),
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    /// Month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self, CostError> {
        Self::month(date.year(), date.month())
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    pub fn time_period(&self) -> TimePeriod {
        TimePeriod {
            start: self.start_str(),
            end: self.end_str(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_str(), self.end_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Monthly,
}

/// A fully built `GetCostAndUsage` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostRequest {
    pub period: DateRange,
    pub granularity: Granularity,
    pub metrics: Vec<String>,
    pub account_id: Option<String>,
    pub filter: FilterExpression,
}

impl CostRequest {
    /// Monthly unblended cost for `period`, credits excluded, optionally
    /// restricted to one linked account.
    pub fn monthly_unblended(period: DateRange, account_id: Option<&str>) -> Self {
        Self {
            period,
            granularity: Granularity::Monthly,
            metrics: vec![UNBLENDED_COST.to_string()],
            account_id: account_id.map(str::to_string),
            filter: FilterExpression::for_account(account_id),
        }
    }
}

/// The billing collaborator a [`CostEngine`] queries (Cost Explorer or mock).
#[async_trait]
pub trait CostExplorerApi: Send + Sync {
    async fn get_cost_and_usage(&self, request: &CostRequest) -> Result<CostResult, ServiceError>;
}

/// Cost queries with date validation in front of a [`CostExplorerApi`].
#[derive(Clone)]
pub struct CostEngine {
    api: Arc<dyn CostExplorerApi>,
}

impl CostEngine {
    pub fn new(api: Arc<dyn CostExplorerApi>) -> Self {
        Self { api }
    }

    /// Monthly cost between two `YYYY-MM-DD` dates.
    ///
    /// An empty account id means organization-wide, like an absent one.
    pub async fn get_cost(
        &self,
        start_date: &str,
        end_date: &str,
        account_id: Option<&str>,
    ) -> Result<CostResult, CostError> {
        let period = DateRange::parse(start_date, end_date)?;
        self.get_cost_for_range(period, account_id).await
    }

    /// Cost for one calendar month.
    pub async fn get_cost_for_month(
        &self,
        year: i32,
        month: u32,
        account_id: Option<&str>,
    ) -> Result<CostResult, CostError> {
        let period = DateRange::month(year, month)?;
        self.get_cost_for_range(period, account_id).await
    }

    pub async fn get_cost_for_range(
        &self,
        period: DateRange,
        account_id: Option<&str>,
    ) -> Result<CostResult, CostError> {
        let account_id = account_id.filter(|id| !id.is_empty());
        let request = CostRequest::monthly_unblended(period, account_id);

        tracing::debug!(
            period = %period,
            account_id = account_id.unwrap_or("<all>"),
            filter = %serde_json::to_string(&request.filter).unwrap_or_default(),
            "Querying unblended cost"
        );

        let result = self.api.get_cost_and_usage(&request).await?;
        tracing::debug!(buckets = result.results_by_time.len(), "Cost query complete");
        Ok(result)
    }
}
