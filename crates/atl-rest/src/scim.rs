//! Atlassian Admin SCIM 2.0 types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A provisioned user.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub emails: Vec<ScimEmail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One of a user's email addresses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScimEmail {
    pub value: String,
    #[serde(rename = "type", default)]
    pub email_type: Option<String>,
    #[serde(default)]
    pub primary: Option<bool>,
}

/// A provisioned group.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimGroup {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub members: Vec<ScimMember>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference from a group to one of its members.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScimMember {
    pub value: String,
    #[serde(default)]
    pub display: Option<String>,
}
