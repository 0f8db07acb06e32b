//! Confluence types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page, blog post, comment or attachment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Content {
    pub id: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Confluence space.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    pub key: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub space_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A label attached to content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The kind of child content to list under a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildType {
    Page,
    Comment,
    Attachment,
}

impl ChildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildType::Page => "page",
            ChildType::Comment => "comment",
            ChildType::Attachment => "attachment",
        }
    }
}

impl fmt::Display for ChildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
