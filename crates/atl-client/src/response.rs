//! The captured result of one transport call.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::classify;
use crate::error::{Error, ErrorContext, ErrorKind, Result};
use crate::request::RequestMethod;

/// Status, endpoint, method, headers and the fully buffered body of one
/// response.
///
/// The body is read exactly once, when the envelope is built, so it stays
/// available after a failed decode. [`Envelope::decode`] borrows the
/// envelope and can be called any number of times.
#[derive(Debug)]
pub struct Envelope {
    status: u16,
    endpoint: String,
    method: RequestMethod,
    headers: BTreeMap<String, Vec<String>>,
    body: Bytes,
}

impl Envelope {
    /// Build an envelope from already captured parts.
    ///
    /// Header names are lower-cased; repeated headers keep their order.
    pub fn new<I, K, V>(
        status: u16,
        method: RequestMethod,
        endpoint: impl Into<String>,
        headers: I,
        body: impl Into<Bytes>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in headers {
            map.entry(name.as_ref().to_ascii_lowercase())
                .or_default()
                .push(value.into());
        }

        Self {
            status,
            endpoint: endpoint.into(),
            method,
            headers: map,
            body: body.into(),
        }
    }

    /// Buffer a reqwest response in full.
    pub(crate) async fn from_response(
        method: RequestMethod,
        endpoint: String,
        response: reqwest::Response,
    ) -> Result<Self> {
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                let mut context = ErrorContext::request(method, endpoint);
                context.status = Some(status);
                return Err(Error::from(err).with_context(context));
            }
        };

        Ok(Self::new(status, method, endpoint, headers, body))
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The request URL, including query parameters.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// All headers, keyed by lower-cased name.
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// Get the first value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_all(name).first().map(String::as_str)
    }

    /// Get every value of a header, in the order received.
    pub fn header_all(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the Retry-After header as a Duration.
    ///
    /// Only the delay-seconds form is understood. The value is informational;
    /// nothing in this crate retries.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// The raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The diagnostic context of this call, raw body included.
    pub fn context(&self) -> ErrorContext {
        ErrorContext {
            endpoint: self.endpoint.clone(),
            method: self.method,
            status: Some(self.status),
            body: Some(self.body.clone()),
        }
    }

    /// Deserialize the body as JSON.
    ///
    /// Non-2xx envelopes are never decoded as the success shape: the
    /// classified error is returned instead. An empty 2xx body decodes as
    /// JSON `null`, so `()` and `Option<T>` targets accept `204 No Content`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(self.to_error());
        }

        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };

        serde_json::from_slice(bytes).map_err(|err| {
            debug!(
                endpoint = %self.endpoint,
                status = self.status,
                target = std::any::type_name::<T>(),
                error = %err,
                "Response body did not match expected shape"
            );
            Error::with_source(ErrorKind::Decode(err.to_string()), err).with_context(self.context())
        })
    }

    /// Pass a 2xx envelope through; turn anything else into its classified
    /// error.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.to_error())
        }
    }

    /// The classified error for this envelope, with full context attached.
    pub fn to_error(&self) -> Error {
        Error::new(classify::classify(self)).with_context(self.context())
    }
}
