//! Core HTTP client: one request in, one buffered [`Envelope`] out.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorContext, ErrorKind, Result};
use crate::request::{RequestAuth, RequestBody, RequestBuilder, RequestMethod};
use crate::response::Envelope;

/// HTTP client for Atlassian Cloud APIs.
///
/// Transport failures and timeouts become [`ErrorKind::Network`]. Nothing is
/// retried; callers that want retries wrap [`HttpClient::execute`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url)
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Put, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Send a request and buffer the whole response.
    ///
    /// Any status is returned as an envelope; only a failure to get a
    /// response at all is an error.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Envelope> {
        let RequestBuilder {
            method,
            url,
            headers,
            query_params,
            body,
            auth,
        } = request;

        let mut url = url::Url::parse(&url)
            .map_err(|e| Error::from(e).with_context(ErrorContext::request(method, url.as_str())))?;
        if !query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query_params {
                pairs.append_pair(name, value);
            }
        }
        let endpoint = url.to_string();

        let mut req = self.inner.request(method.to_reqwest(), url);

        match auth {
            Some(RequestAuth::Bearer(token)) => req = req.bearer_auth(token),
            Some(RequestAuth::Basic { username, password }) => {
                req = req.basic_auth(username, Some(password))
            }
            None => {}
        }

        for (name, value) in &headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = body {
            req = match body {
                RequestBody::Json(value) => req.json(&value),
                RequestBody::Text(text) => req.body(text),
                RequestBody::Bytes(bytes) => req.body(bytes),
            };
        }

        if self.config.enable_tracing {
            debug!(%method, url = %endpoint, "Sending request");
        }

        let response = req.send().await.map_err(|err| {
            Error::from(err).with_context(ErrorContext::request(method, endpoint.as_str()))
        })?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Envelope::from_response(method, endpoint, response).await
    }

    /// Execute a request and fail on any non-2xx status.
    pub async fn send(&self, request: RequestBuilder) -> Result<Envelope> {
        self.execute(request).await?.error_for_status()
    }

    /// Execute a request and deserialize the JSON response.
    pub async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        self.execute(request).await?.decode()
    }
}
