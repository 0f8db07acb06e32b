//! HTTP request building.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential attached to a single request.
#[derive(Clone)]
pub(crate) enum RequestAuth {
    Bearer(String),
    Basic { username: String, password: String },
}

impl fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestAuth::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            RequestAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Builder for HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) auth: Option<RequestAuth>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            auth: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The request URL, without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(RequestAuth::Bearer(token.into()));
        self
    }

    /// Set basic credentials (Atlassian account email and API token).
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(RequestAuth::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Add several query parameters, preserving their order.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Set text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self.headers
            .insert("Content-Type".to_string(), "text/plain".to_string());
        self
    }

    /// Set bytes body.
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// Set the SCIM media type on both request and response.
    pub fn scim(mut self) -> Self {
        self.headers
            .insert("Accept".to_string(), "application/scim+json".to_string());
        if self.body.is_some() {
            self.headers.insert(
                "Content-Type".to_string(),
                "application/scim+json".to_string(),
            );
        }
        self
    }

    /// Opt out of Atlassian's XSRF check for write requests.
    pub fn no_check(mut self) -> Self {
        self.headers
            .insert("X-Atlassian-Token".to_string(), "no-check".to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(
            RequestMethod::Get,
            "https://example.atlassian.net/rest/api/3/search",
        )
        .bearer_auth("token123")
        .header("X-Custom", "value")
        .query("jql", "project = ABC");

        assert_eq!(req.method(), RequestMethod::Get);
        assert_eq!(req.url(), "https://example.atlassian.net/rest/api/3/search");
        assert!(matches!(req.auth, Some(RequestAuth::Bearer(ref t)) if t == "token123"));
        assert_eq!(req.headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(req.query_params.len(), 1);
    }

    #[test]
    fn test_query_pairs_preserve_order() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://example.com")
            .query_pairs([("startAt", "10"), ("maxResults", "50")]);

        assert_eq!(
            req.query_params,
            vec![
                ("startAt".to_string(), "10".to_string()),
                ("maxResults".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body() {
        let data = serde_json::json!({"body": "A comment"});
        let req = RequestBuilder::new(RequestMethod::Post, "https://example.com")
            .json(&data)
            .unwrap();

        assert!(matches!(req.body, Some(RequestBody::Json(_))));
        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_scim_headers() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://api.atlassian.com")
            .json_value(serde_json::json!({"userName": "a"}))
            .scim();

        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/scim+json".to_string())
        );
        assert_eq!(
            req.headers.get("Accept"),
            Some(&"application/scim+json".to_string())
        );
    }

    #[test]
    fn test_basic_auth_is_redacted_in_debug() {
        let req = RequestBuilder::new(RequestMethod::Get, "https://example.com")
            .basic_auth("me@example.com", "ATATT3xFfGF0secret");

        let debug = format!("{:?}", req);
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("ATATT3xFfGF0secret"));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(RequestMethod::Delete.to_string(), "DELETE");
        assert_eq!(RequestMethod::Get.as_str(), "GET");
    }
}
