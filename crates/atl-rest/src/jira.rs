//! Jira platform types.
//!
//! Only identifiers and a few common fields are typed; everything else the
//! server sends is kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Jira issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Issue fields, keyed by field ID (`summary`, `customfield_10010`, ...).
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// The `summary` field, if it was requested and is a string.
    pub fn summary(&self) -> Option<&str> {
        self.fields.get("summary")?.as_str()
    }
}

/// An Atlassian account as embedded in Jira resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment on an issue. The body is an Atlassian Document Format node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for adding a comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub body: Value,
}

impl NewComment {
    /// A comment whose body is a prebuilt Atlassian Document Format node.
    pub fn adf(body: Value) -> Self {
        Self { body }
    }

    /// A single-paragraph plain text comment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: serde_json::json!({
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": text.into()}]
                }]
            }),
        }
    }

    /// Returns true if there is nothing to post.
    pub fn is_empty(&self) -> bool {
        match &self.body {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Object(node) => node
                .get("content")
                .and_then(Value::as_array)
                .is_none_or(|content| content.iter().all(is_blank_node)),
            _ => false,
        }
    }
}

fn is_blank_node(node: &Value) -> bool {
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        return text.trim().is_empty();
    }
    node.get("content")
        .and_then(Value::as_array)
        .is_none_or(|content| content.iter().all(is_blank_node))
}

/// A project version (release).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub released: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Time logged against an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    pub id: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub time_spent_seconds: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
