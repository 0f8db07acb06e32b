//! Classification of failed responses into [`ErrorKind`].
//!
//! | Status      | Kind           |
//! |-------------|----------------|
//! | 401, 403    | `Unauthorized` |
//! | 404         | `NotFound`     |
//! | 400, 422    | `BadRequest`   |
//! | 5xx         | `Internal`     |
//! | anything else | `Internal`   |
//!
//! The message comes from whichever Atlassian error body shape parses;
//! otherwise from the sanitized raw text. Classification is total and
//! deterministic for a given status and body.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Deserialize;

use crate::error::ErrorKind;
use crate::response::Envelope;

const MAX_MESSAGE_LENGTH: usize = 500;

/// Map a failed envelope to exactly one [`ErrorKind`].
pub fn classify(envelope: &Envelope) -> ErrorKind {
    let status = envelope.status();
    let message = parse_error_message(envelope.body())
        .unwrap_or_else(|| fallback_message(status, &envelope.text_lossy()));
    kind_for_status(status, sanitize_error_message(&message))
}

fn kind_for_status(status: u16, message: String) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Unauthorized(message),
        404 => ErrorKind::NotFound(message),
        400 | 422 => ErrorKind::BadRequest(message),
        _ => ErrorKind::Internal(message),
    }
}

fn fallback_message(status: u16, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, text)
    }
}

/// The error body shapes returned across Jira, Confluence, Service Desk,
/// the Admin SCIM API and the API gateway, merged into one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    /// Jira: `{"errorMessages": [...], "errors": {...}}`
    #[serde(default)]
    error_messages: Option<Vec<String>>,
    /// Jira: field name to message. Admin API: a list of error objects.
    #[serde(default)]
    errors: Option<serde_json::Value>,
    /// Service Desk.
    error_message: Option<String>,
    /// Confluence and the gateway.
    message: Option<String>,
    /// SCIM (RFC 7644).
    detail: Option<String>,
    title: Option<String>,
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        let mut parts: Vec<String> = self
            .error_messages
            .into_iter()
            .flatten()
            .filter(|m| !m.trim().is_empty())
            .collect();

        match self.errors {
            Some(serde_json::Value::Object(fields)) => {
                for (field, message) in fields {
                    match message {
                        serde_json::Value::String(message) => {
                            parts.push(format!("{}: {}", field, message))
                        }
                        other => parts.push(format!("{}: {}", field, other)),
                    }
                }
            }
            Some(serde_json::Value::Array(items)) => {
                parts.extend(items.iter().filter_map(|item| {
                    ["detail", "message", "title"]
                        .iter()
                        .find_map(|key| item.get(key)?.as_str())
                        .map(str::to_string)
                }));
            }
            _ => {}
        }

        parts.extend(
            [self.error_message, self.message, self.detail, self.title]
                .into_iter()
                .flatten()
                .filter(|m| !m.trim().is_empty()),
        );

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

fn parse_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()?
        .into_message()
}

static BEARER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-._~+/]+=*").ok());

static API_TOKEN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"ATATT[A-Za-z0-9_\-=]+").ok());

/// Sanitize an error message to prevent exposing credentials.
///
/// Redacts bearer tokens and Atlassian API tokens, then truncates to
/// [`MAX_MESSAGE_LENGTH`] characters.
fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = message.to_string();

    if let Some(pattern) = BEARER_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "Bearer [REDACTED]")
            .into_owned();
    }
    if let Some(pattern) = API_TOKEN_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .into_owned();
    }

    if let Some((cut, _)) = sanitized.char_indices().nth(MAX_MESSAGE_LENGTH) {
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
