//! Action-group dispatcher.
//!
//! Routes an agent's action-group event by `apiPath` to the account
//! directory or the cost engine and wraps the result in the response
//! envelope the agent expects.

pub mod error;
pub mod types;

pub use error::ActionError;
pub use types::{ActionRequest, ActionResponse, ApiResponse, Parameter, ResponseContent, APPLICATION_JSON};

use crate::cost::ResultByTime;
use crate::logging::generate_request_id;
use crate::sources::DataSources;
use serde::Serialize;
use std::fmt;

pub const ACCOUNTS_PATH: &str = "/accounts";
pub const ACCOUNT_COSTS_PATH: &str = "/account/{accountId}/costs";

pub const PARAM_ACCOUNT_ID: &str = "accountId";
pub const PARAM_START_DATE: &str = "start_date";
pub const PARAM_END_DATE: &str = "end_date";

/// The operations the action group exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    Accounts,
    AccountCosts,
}

impl ApiRoute {
    /// Match an `apiPath` exactly; agents send the path template verbatim.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            ACCOUNTS_PATH => Some(ApiRoute::Accounts),
            ACCOUNT_COSTS_PATH => Some(ApiRoute::AccountCosts),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ApiRoute::Accounts => ACCOUNTS_PATH,
            ApiRoute::AccountCosts => ACCOUNT_COSTS_PATH,
        }
    }
}

impl fmt::Display for ApiRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Body of a `/account/{accountId}/costs` answer.
#[derive(Debug, Serialize)]
struct CostsBody<'a> {
    response: CostsPayload<'a>,
}

#[derive(Debug, Serialize)]
struct CostsPayload<'a> {
    #[serde(rename = "Costs")]
    costs: &'a [ResultByTime],
}

#[derive(Clone)]
pub struct ActionDispatcher {
    sources: DataSources,
    log_events: bool,
}

impl ActionDispatcher {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            log_events: false,
        }
    }

    /// Log full request and response envelopes at debug level.
    pub fn with_event_logging(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    pub fn sources(&self) -> &DataSources {
        &self.sources
    }

    pub async fn handle(&self, request: &ActionRequest) -> Result<ActionResponse, ActionError> {
        let request_id = generate_request_id();

        tracing::info!(
            request_id = %request_id,
            action_group = %request.action_group,
            api_path = %request.api_path,
            http_method = %request.http_method,
            "Action group invoked"
        );
        if self.log_events {
            tracing::debug!(
                request_id = %request_id,
                event = %serde_json::to_string(request).unwrap_or_default(),
                "Action group event"
            );
        }

        let route = ApiRoute::from_path(&request.api_path).ok_or_else(|| {
            tracing::warn!(request_id = %request_id, api_path = %request.api_path, "Unknown API path");
            ActionError::UnknownPath {
                path: request.api_path.clone(),
            }
        })?;

        let body = match route {
            ApiRoute::Accounts => self.accounts_body().await?,
            ApiRoute::AccountCosts => self.costs_body(&request_id, request).await?,
        };

        let response = ActionResponse::ok(request, body);
        if self.log_events {
            tracing::debug!(
                request_id = %request_id,
                response = %serde_json::to_string(&response).unwrap_or_default(),
                "Action group response"
            );
        }
        Ok(response)
    }

    async fn accounts_body(&self) -> Result<String, ActionError> {
        let accounts = self.sources.accounts.list_accounts().await?;
        tracing::debug!(count = accounts.len(), "Listed accounts");
        Ok(serde_json::to_string(&accounts)?)
    }

    /// Missing dates are passed on empty so the engine reports them as
    /// malformed.
    async fn costs_body(
        &self,
        request_id: &str,
        request: &ActionRequest,
    ) -> Result<String, ActionError> {
        let account_id = request.parameter(PARAM_ACCOUNT_ID);
        let start_date = request.parameter(PARAM_START_DATE).unwrap_or_default();
        let end_date = request.parameter(PARAM_END_DATE).unwrap_or_default();

        tracing::info!(
            request_id = %request_id,
            account_id = account_id.unwrap_or("<all>"),
            start_date,
            end_date,
            "Cost query"
        );

        let result = self
            .sources
            .costs
            .get_cost(start_date, end_date, account_id)
            .await?;

        Ok(serde_json::to_string(&CostsBody {
            response: CostsPayload {
                costs: &result.results_by_time,
            },
        })?)
    }
}
