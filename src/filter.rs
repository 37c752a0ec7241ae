//! Tag-based account filtering.

use crate::directory::Account;

/// Exact-match criteria on the Owner, Environment and Department tags.
///
/// Unset criteria match everything. A set criterion never matches an account
/// that lacks the tag, not even when the criterion is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub owner: Option<String>,
    pub environment: Option<String>,
    pub department: Option<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.environment.is_none() && self.department.is_none()
    }

    pub fn matches(&self, account: &Account) -> bool {
        fn check(wanted: &Option<String>, actual: Option<&str>) -> bool {
            match wanted {
                None => true,
                Some(w) => actual == Some(w.as_str()),
            }
        }

        check(&self.owner, account.owner())
            && check(&self.environment, account.environment())
            && check(&self.department, account.department())
    }

    /// Matching accounts, in their original order.
    pub fn apply(&self, accounts: &[Account]) -> Vec<Account> {
        accounts
            .iter()
            .filter(|account| self.matches(account))
            .cloned()
            .collect()
    }
}

/// Filter accounts by optional owner, environment and department tag values.
pub fn filter_accounts(
    accounts: &[Account],
    owner: Option<&str>,
    environment: Option<&str>,
    department: Option<&str>,
) -> Vec<Account> {
    AccountFilter {
        owner: owner.map(str::to_string),
        environment: environment.map(str::to_string),
        department: department.map(str::to_string),
    }
    .apply(accounts)
}
