//! Jira Service Management types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A service desk project.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDesk {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An agent queue.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub jql: Option<String>,
    #[serde(default)]
    pub issue_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer request, the portal view of an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub issue_id: String,
    pub issue_key: String,
    #[serde(default)]
    pub request_type_id: Option<String>,
    #[serde(default)]
    pub service_desk_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment on a customer request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestComment {
    pub id: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Visible to the customer when true; internal note otherwise.
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
