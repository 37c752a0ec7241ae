//! Organization account records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const TAG_OWNER: &str = "Owner";
pub const TAG_DEPARTMENT: &str = "Department";
pub const TAG_ENVIRONMENT: &str = "Environment";

/// Format of `JoinedTimestamp` in every account payload
pub const JOINED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Membership status of an account within the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Suspended,
    Pending,
    /// Closed accounts linger in this state for 90 days
    PendingClosure,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Suspended => "SUSPENDED",
            AccountStatus::Pending => "PENDING",
            AccountStatus::PendingClosure => "PENDING_CLOSURE",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(AccountStatus::Active),
            "SUSPENDED" => Ok(AccountStatus::Suspended),
            "PENDING" => Ok(AccountStatus::Pending),
            "PENDING_CLOSURE" => Ok(AccountStatus::PendingClosure),
            _ => Err(format!("Unknown account status: {}", s)),
        }
    }
}

/// An account in the organization, with its tags.
///
/// Serialized with the field names the action-group OpenAPI schema declares:
///
/// ```json
/// {"Id": "123456789001", "Name": "Networking", "Status": "ACTIVE",
///  "JoinedTimestamp": "2023-04-01 09:30:00", "Tags": {"Owner": "jane.smith@examplecorp.com"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: AccountStatus,
    #[serde(with = "joined_timestamp")]
    pub joined_timestamp: NaiveDateTime,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Account {
    /// Value of a tag, if the account carries it.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn owner(&self) -> Option<&str> {
        self.tag(TAG_OWNER)
    }

    pub fn department(&self) -> Option<&str> {
        self.tag(TAG_DEPARTMENT)
    }

    pub fn environment(&self) -> Option<&str> {
        self.tag(TAG_ENVIRONMENT)
    }
}

mod joined_timestamp {
    use super::JOINED_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(JOINED_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, JOINED_TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
