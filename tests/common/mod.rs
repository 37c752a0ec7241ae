//! Shared test utilities for finops integration tests.
//!
//! Provides account builders, in-memory collaborators (a cost ledger that
//! evaluates filter expressions, a scripted agent runtime), and app setup.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use finops::action::ActionDispatcher;
use finops::agent::{AgentEvent, AgentEventStream, AgentRuntime, InvokeRequest, TokenUsage};
use finops::api::{create_router, AppState};
use finops::config::{FinopsConfig, MockConfig};
use finops::cost::{
    CostExplorerApi, CostRequest, CostResult, CostTotal, Dimension, MetricValue, ResultByTime,
    CREDIT_RECORD_TYPE,
};
use finops::directory::{Account, AccountDirectory, AccountStatus};
use finops::mock::MockProvider;
use finops::sources::{DataSources, ServiceError};
use futures::{stream, StreamExt};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// =============================================================================
// Account Builders
// =============================================================================

pub fn make_account(id: &str, name: &str, tags: &[(&str, &str)]) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(format!("aws+{}@examplecorp.com", id)),
        status: AccountStatus::Active,
        joined_timestamp: NaiveDate::from_ymd_opt(2022, 6, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap(),
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Fixed account list; optionally fails every call.
pub struct StaticDirectory {
    pub accounts: Vec<Account>,
    pub fail: bool,
}

impl StaticDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            accounts: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl AccountDirectory for StaticDirectory {
    async fn list_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        if self.fail {
            return Err(ServiceError::message("ListAccounts", "AccessDeniedException"));
        }
        Ok(self.accounts.clone())
    }
}

// =============================================================================
// Cost Ledger
// =============================================================================

/// One line item on the bill.
#[derive(Debug, Clone)]
pub struct LedgerRecord {
    pub account_id: String,
    pub record_type: String,
    pub date: NaiveDate,
    pub amount: Decimal,
}

pub fn usage(account_id: &str, date: &str, amount: &str) -> LedgerRecord {
    record(account_id, "Usage", date, amount)
}

pub fn credit(account_id: &str, date: &str, amount: &str) -> LedgerRecord {
    record(account_id, CREDIT_RECORD_TYPE, date, amount)
}

fn record(account_id: &str, record_type: &str, date: &str, amount: &str) -> LedgerRecord {
    LedgerRecord {
        account_id: account_id.to_string(),
        record_type: record_type.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount: amount.parse().unwrap(),
    }
}

/// Cost Explorer stand-in that applies the request's filter expression to
/// individual records, the way the real service does.
///
/// Returns one bucket for the requested period when any record matches and
/// no buckets otherwise.
#[derive(Default)]
pub struct LedgerCostApi {
    pub records: Vec<LedgerRecord>,
    pub requests: Mutex<Vec<CostRequest>>,
}

impl LedgerCostApi {
    pub fn new(records: Vec<LedgerRecord>) -> Self {
        Self {
            records,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CostExplorerApi for LedgerCostApi {
    async fn get_cost_and_usage(&self, request: &CostRequest) -> Result<CostResult, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());

        let matching: Vec<&LedgerRecord> = self
            .records
            .iter()
            .filter(|r| r.date >= request.period.start && r.date < request.period.end)
            .filter(|r| {
                let dims = HashMap::from([
                    (Dimension::RecordType, r.record_type.clone()),
                    (Dimension::LinkedAccount, r.account_id.clone()),
                ]);
                request.filter.matches(&dims)
            })
            .collect();

        if matching.is_empty() {
            return Ok(CostResult::default());
        }

        let amount: Decimal = matching.iter().map(|r| r.amount).sum();
        Ok(CostResult {
            results_by_time: vec![ResultByTime {
                time_period: request.period.time_period(),
                total: CostTotal {
                    unblended_cost: MetricValue::usd(amount),
                },
            }],
        })
    }
}

/// Cost Explorer stand-in that always fails.
pub struct FailingCostApi;

#[async_trait]
impl CostExplorerApi for FailingCostApi {
    async fn get_cost_and_usage(&self, _: &CostRequest) -> Result<CostResult, ServiceError> {
        Err(ServiceError::message("GetCostAndUsage", "LimitExceededException"))
    }
}

// =============================================================================
// Scripted Agent Runtime
// =============================================================================

pub enum AgentReply {
    Events(Vec<AgentEvent>),
    Fail(&'static str),
}

/// Answers each invocation with the next scripted reply.
#[derive(Default)]
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<AgentReply>>,
    pub prompts: Mutex<Vec<InvokeRequest>>,
}

impl ScriptedAgent {
    pub fn new(replies: Vec<AgentReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

pub fn answer(text: &str, input_tokens: u64, output_tokens: u64) -> AgentReply {
    AgentReply::Events(vec![
        AgentEvent::Trace {
            usage: Some(TokenUsage::new(input_tokens, output_tokens)),
        },
        AgentEvent::Chunk(text.as_bytes().to_vec()),
    ])
}

#[async_trait]
impl AgentRuntime for ScriptedAgent {
    async fn invoke(&self, request: InvokeRequest) -> Result<AgentEventStream, ServiceError> {
        self.prompts.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(AgentReply::Events(events)) => Ok(stream::iter(events.into_iter().map(Ok)).boxed()),
            Some(AgentReply::Fail(message)) => Err(ServiceError::message("InvokeAgent", message)),
            None => Err(ServiceError::message("InvokeAgent", "no scripted reply")),
        }
    }
}

// =============================================================================
// App Setup
// =============================================================================

pub fn seeded_provider(seed: u64) -> Arc<MockProvider> {
    Arc::new(MockProvider::new(&MockConfig {
        enabled: true,
        seed: Some(seed),
        ..Default::default()
    }))
}

pub fn mock_dispatcher(seed: u64) -> (ActionDispatcher, Arc<MockProvider>) {
    let provider = seeded_provider(seed);
    (
        ActionDispatcher::new(DataSources::mock(provider.clone())),
        provider,
    )
}

pub fn test_router(dispatcher: ActionDispatcher) -> axum::Router {
    let state = Arc::new(AppState::new(dispatcher, Arc::new(FinopsConfig::default())));
    create_router(state)
}
