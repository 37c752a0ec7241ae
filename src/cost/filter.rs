//! Cost Explorer filter expressions.
//!
//! Mirrors the `Expression` grammar of `GetCostAndUsage` for the two
//! dimensions the cost queries use. Serializes to the same JSON the API
//! accepts, which is what gets logged.

use serde::Serialize;
use std::collections::HashMap;

/// Record type that must never count toward spend (refunds, promotional credits).
pub const CREDIT_RECORD_TYPE: &str = "Credit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    RecordType,
    LinkedAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionValues {
    pub key: Dimension,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FilterExpression {
    Not(Box<FilterExpression>),
    And(Vec<FilterExpression>),
    Dimensions(DimensionValues),
}

impl FilterExpression {
    pub fn dimension(key: Dimension, value: impl Into<String>) -> Self {
        FilterExpression::Dimensions(DimensionValues {
            key,
            values: vec![value.into()],
        })
    }

    /// `Not(RECORD_TYPE = Credit)`
    pub fn exclude_credits() -> Self {
        FilterExpression::Not(Box::new(Self::dimension(
            Dimension::RecordType,
            CREDIT_RECORD_TYPE,
        )))
    }

    /// Filter for a cost query: credits are always excluded; an account id
    /// is ANDed on top, never ORed.
    pub fn for_account(account_id: Option<&str>) -> Self {
        match account_id {
            None => Self::exclude_credits(),
            Some(id) => FilterExpression::And(vec![
                Self::exclude_credits(),
                Self::dimension(Dimension::LinkedAccount, id),
            ]),
        }
    }

    /// Evaluate the expression against one cost record's dimension values.
    ///
    /// A record lacking a dimension never matches a `Dimensions` clause on it.
    pub fn matches(&self, record: &HashMap<Dimension, String>) -> bool {
        match self {
            FilterExpression::Not(inner) => !inner.matches(record),
            FilterExpression::And(clauses) => clauses.iter().all(|c| c.matches(record)),
            FilterExpression::Dimensions(dim) => record
                .get(&dim.key)
                .is_some_and(|value| dim.values.contains(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(record_type: &str, account: &str) -> HashMap<Dimension, String> {
        HashMap::from([
            (Dimension::RecordType, record_type.to_string()),
            (Dimension::LinkedAccount, account.to_string()),
        ])
    }

    #[test]
    fn test_org_wide_filter_json() {
        let json = serde_json::to_value(FilterExpression::for_account(None)).unwrap();
        assert_eq!(
            json,
            json!({"Not": {"Dimensions": {"Key": "RECORD_TYPE", "Values": ["Credit"]}}})
        );
    }

    #[test]
    fn test_account_filter_json_is_and() {
        let json =
            serde_json::to_value(FilterExpression::for_account(Some("123456789001"))).unwrap();
        assert_eq!(
            json,
            json!({"And": [
                {"Not": {"Dimensions": {"Key": "RECORD_TYPE", "Values": ["Credit"]}}},
                {"Dimensions": {"Key": "LINKED_ACCOUNT", "Values": ["123456789001"]}}
            ]})
        );
    }

    #[test]
    fn test_exclude_credits_matches() {
        let filter = FilterExpression::exclude_credits();
        assert!(filter.matches(&record("Usage", "1")));
        assert!(filter.matches(&record("Tax", "1")));
        assert!(!filter.matches(&record("Credit", "1")));
    }

    #[test]
    fn test_account_filter_requires_both_clauses() {
        let filter = FilterExpression::for_account(Some("111"));
        assert!(filter.matches(&record("Usage", "111")));
        // Right account, but a credit
        assert!(!filter.matches(&record("Credit", "111")));
        // Not a credit, but another account
        assert!(!filter.matches(&record("Usage", "222")));
    }

    #[test]
    fn test_missing_dimension_never_matches() {
        let filter = FilterExpression::dimension(Dimension::LinkedAccount, "111");
        let record = HashMap::from([(Dimension::RecordType, "Usage".to_string())]);
        assert!(!filter.matches(&record));
    }
}
