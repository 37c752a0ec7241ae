//! Cost Explorer result shapes.
//!
//! Field names follow the `GetCostAndUsage` response so that mock and
//! real results serialize identically.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const UNBLENDED_COST: &str = "UnblendedCost";
pub const USD: &str = "USD";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostResult {
    pub results_by_time: Vec<ResultByTime>,
}

impl CostResult {
    /// Sum of every bucket's amount; `None` if any amount is not a decimal.
    pub fn total(&self) -> Option<Decimal> {
        self.results_by_time
            .iter()
            .map(|r| r.total.unblended_cost.decimal())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    pub time_period: TimePeriod,
    pub total: CostTotal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostTotal {
    pub unblended_cost: MetricValue,
}

/// Amount is kept as the decimal string the billing API returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    pub amount: String,
    pub unit: String,
}

impl MetricValue {
    pub fn usd(amount: Decimal) -> Self {
        Self {
            amount: amount.to_string(),
            unit: USD.to_string(),
        }
    }

    pub fn decimal(&self) -> Option<Decimal> {
        self.amount.parse().ok()
    }
}
