//! Action-group request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Content type of the only response body the dispatcher produces.
pub const APPLICATION_JSON: &str = "application/json";

/// Event an agent sends to an action group.
///
/// Fields the dispatcher does not interpret (`agent`, `requestBody`,
/// session attributes) are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_session_attributes: Option<Value>,
}

impl ActionRequest {
    pub fn new(action_group: &str, api_path: &str, http_method: &str) -> Self {
        Self {
            action_group: action_group.to_string(),
            api_path: api_path.to_string(),
            http_method: http_method.to_string(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.push(Parameter {
            name: name.to_string(),
            kind: Some("string".to_string()),
            value: value.to_string(),
        });
        self
    }

    /// Value of the last parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_version: Option<String>,
    pub response: ApiResponse,
}

/// Routing metadata echoed from the request plus the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: BTreeMap<String, ResponseContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContent {
    /// Serialized JSON document
    pub body: String,
}

impl ActionResponse {
    /// A 200 response for `request` carrying `body` as `application/json`.
    pub fn ok(request: &ActionRequest, body: String) -> Self {
        Self {
            message_version: request.message_version.clone(),
            response: ApiResponse {
                action_group: request.action_group.clone(),
                api_path: request.api_path.clone(),
                http_method: request.http_method.clone(),
                http_status_code: 200,
                response_body: BTreeMap::from([(
                    APPLICATION_JSON.to_string(),
                    ResponseContent { body },
                )]),
            },
        }
    }

    /// The `application/json` body, if present.
    pub fn body(&self) -> Option<&str> {
        self.response
            .response_body
            .get(APPLICATION_JSON)
            .map(|content| content.body.as_str())
    }
}
