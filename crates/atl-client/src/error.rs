//! Error types for atl-client.
//!
//! Every failed operation produces exactly one [`Error`]. Callers branch on
//! [`ErrorKind`]; the HTTP details that led to it live in [`ErrorContext`]
//! and are there for diagnostics only.

use bytes::Bytes;

use crate::request::RequestMethod;

/// Result type alias for atl-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for atl-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// The call that failed, when one was issued.
    pub context: Option<ErrorContext>,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            context: None,
            source: Some(Box::new(source)),
        }
    }

    /// A pre-flight failure for a required field that was empty or zero.
    pub fn validation(field: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation {
            field: field.into(),
        })
    }

    /// A traversal stopped by its cancellation token.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Attach the failed call's context.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// The failed call's context, if a request was issued.
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_ref()
    }

    /// The raw response body of the failed call, if one was received.
    pub fn raw_body(&self) -> Option<&[u8]> {
        self.context.as_ref()?.body.as_deref()
    }

    /// Returns true if this error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }

    /// The name of the field that failed validation.
    pub fn validation_field(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Validation { field } => Some(field),
            _ => None,
        }
    }

    /// Returns true if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if a traversal was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Returns true if this error was classified from a server response.
    pub fn is_server_reported(&self) -> bool {
        self.kind.is_server_reported()
    }
}

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A required field was empty or zero. No request was sent.
    #[error("Missing required field: {field}")]
    Validation { field: String },

    /// Transport-level failure, including timeouts.
    #[error("Network failure: {0}")]
    Network(String),

    /// The body did not match the expected shape.
    #[error("Decode failure: {0}")]
    Decode(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or authorization failure (HTTP 401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server rejected the request (HTTP 400/422).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server failure or any response that could not be classified further.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A paginated traversal observed its cancellation signal.
    #[error("Traversal cancelled")]
    Cancelled,

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true for the kinds produced by the error classifier.
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self,
            ErrorKind::NotFound(_)
                | ErrorKind::Unauthorized(_)
                | ErrorKind::BadRequest(_)
                | ErrorKind::Internal(_)
        )
    }
}

/// The call an error is attributable to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Request URL.
    pub endpoint: String,
    /// Request method.
    pub method: RequestMethod,
    /// Response status, if a response arrived.
    pub status: Option<u16>,
    /// Raw response body, if a response arrived.
    pub body: Option<Bytes>,
}

impl ErrorContext {
    /// Context for a request that never produced a response.
    pub fn request(method: RequestMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            status: None,
            body: None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        Error::with_source(ErrorKind::Network(message), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
