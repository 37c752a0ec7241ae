//! Mock data provider.
//!
//! Stands in for Organizations and Cost Explorer when mock mode is on.
//! Generated data is memoized in a [`MockCache`] owned by the provider:
//! the account list is generated once, and each account id (or the
//! organization-wide `None` key) gets one cost amount for the provider's
//! lifetime. Requested date ranges are never cached.

mod vocabulary;

use crate::config::MockConfig;
use crate::cost::{
    CostExplorerApi, CostRequest, CostResult, CostTotal, DateRange, MetricValue, ResultByTime,
};
use crate::directory::{
    Account, AccountDirectory, AccountStatus, TAG_DEPARTMENT, TAG_ENVIRONMENT, TAG_OWNER,
};
use crate::sources::ServiceError;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use vocabulary::*;

/// Mock costs are drawn in cents from this inclusive range ($100.00 - $5000.00).
const MIN_COST_CENTS: i64 = 10_000;
const MAX_COST_CENTS: i64 = 500_000;

/// Join dates fall this many days before generation time.
const JOINED_DAYS_AGO: std::ops::RangeInclusive<i64> = 100..=1000;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Mock data lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// 95 ACTIVE : 1 SUSPENDED : 1 PENDING
fn pick_status(rng: &mut impl Rng) -> AccountStatus {
    match rng.random_range(0..97u32) {
        0..=94 => AccountStatus::Active,
        95 => AccountStatus::Suspended,
        _ => AccountStatus::Pending,
    }
}

/// Memoized mock output.
#[derive(Debug, Default)]
pub struct MockCache {
    accounts: Mutex<Option<Vec<Account>>>,
    costs: DashMap<Option<String>, Decimal>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget generated accounts and every memoized cost.
    pub fn clear(&self) {
        *lock(&self.accounts) = None;
        self.costs.clear();
    }

    pub fn has_accounts(&self) -> bool {
        lock(&self.accounts).is_some()
    }

    /// Memoized amount for an account id (`None` = organization-wide).
    pub fn cost_for(&self, account_id: Option<&str>) -> Option<Decimal> {
        self.costs
            .get(&account_id.map(str::to_string))
            .map(|amount| *amount)
    }

    pub fn cost_entries(&self) -> usize {
        self.costs.len()
    }
}

/// Generates a synthetic organization and its costs.
pub struct MockProvider {
    account_count: usize,
    rng: Mutex<StdRng>,
    cache: MockCache,
}

impl MockProvider {
    pub fn new(config: &MockConfig) -> Self {
        Self::with_cache(config, MockCache::new())
    }

    /// Build a provider around an existing cache.
    pub fn with_cache(config: &MockConfig, cache: MockCache) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            account_count: config.account_count,
            rng: Mutex::new(rng),
            cache,
        }
    }

    pub fn cache(&self) -> &MockCache {
        &self.cache
    }

    pub fn reset(&self) {
        self.cache.clear();
        tracing::debug!("Mock cache cleared");
    }

    /// The mock organization; generated on first call, identical afterwards.
    pub fn mock_accounts(&self) -> Vec<Account> {
        let mut accounts = lock(&self.cache.accounts);
        accounts
            .get_or_insert_with(|| self.generate_accounts())
            .clone()
    }

    /// One monthly bucket spanning `period`.
    ///
    /// The amount is drawn on the first request for `account_id` and reused
    /// for every later request with the same key, whatever the dates.
    pub fn mock_cost(&self, period: &DateRange, account_id: Option<&str>) -> CostResult {
        let amount = *self
            .cache
            .costs
            .entry(account_id.map(str::to_string))
            .or_insert_with(|| self.draw_amount());

        CostResult {
            results_by_time: vec![ResultByTime {
                time_period: period.time_period(),
                total: CostTotal {
                    unblended_cost: MetricValue::usd(amount),
                },
            }],
        }
    }

    fn draw_amount(&self) -> Decimal {
        let cents = lock(&self.rng).random_range(MIN_COST_CENTS..=MAX_COST_CENTS);
        Decimal::new(cents, 2)
    }

    fn generate_accounts(&self) -> Vec<Account> {
        let mut guard = lock(&self.rng);
        let rng = &mut *guard;

        let owner_emails: Vec<String> = FIRST_NAMES
            .iter()
            .zip(LAST_NAMES)
            .map(|(first, last)| {
                format!(
                    "{}.{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    pick(rng, EMAIL_DOMAINS)
                )
            })
            .collect();

        let now = Local::now().naive_local();
        let now: NaiveDateTime = now.with_nanosecond(0).unwrap_or(now);

        let accounts: Vec<Account> = (1..=self.account_count)
            .map(|i| {
                let name = pick(rng, ACCOUNT_NAMES).to_string();
                let status = pick_status(rng);
                let joined_timestamp = now - Duration::days(rng.random_range(JOINED_DAYS_AGO));
                let owner = owner_emails[rng.random_range(0..owner_emails.len())].clone();

                let tags = BTreeMap::from([
                    (TAG_ENVIRONMENT.to_string(), pick(rng, ENVIRONMENTS).to_string()),
                    (TAG_OWNER.to_string(), owner),
                    ("Project".to_string(), pick(rng, PROJECTS).to_string()),
                    (TAG_DEPARTMENT.to_string(), pick(rng, DEPARTMENTS).to_string()),
                    ("Region".to_string(), pick(rng, REGIONS).to_string()),
                ]);

                Account {
                    id: format!("{}{:02}", ACCOUNT_ID_PREFIX, i),
                    name,
                    email: None,
                    status,
                    joined_timestamp,
                    tags,
                }
            })
            .collect();

        tracing::debug!(count = accounts.len(), "Generated mock accounts");
        accounts
    }
}

#[async_trait]
impl AccountDirectory for MockProvider {
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.mock_accounts())
    }
}

#[async_trait]
impl CostExplorerApi for MockProvider {
    async fn get_cost_and_usage(&self, request: &CostRequest) -> Result<CostResult, ServiceError> {
        Ok(self.mock_cost(&request.period, request.account_id.as_deref()))
    }
}
