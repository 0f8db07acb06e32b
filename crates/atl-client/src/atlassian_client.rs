//! Site-bound Atlassian client with typed JSON methods.
//!
//! `AtlassianClient` combines a site URL and a credential with an
//! [`HttpClient`], builds per-product URLs and wires the [`Paginator`] to the
//! transport.
//!
//! ## Security
//!
//! - Tokens are redacted in Debug output
//! - Request bodies are skipped in tracing spans

use futures::future::{BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, warn};

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::page::{Cursor, IntoPage, Page, PageIdiom};
use crate::paginate::Paginator;
use crate::request::RequestBuilder;
use crate::response::Envelope;

/// Base URL of the Atlassian Admin API, which hosts SCIM provisioning.
pub const DEFAULT_ADMIN_URL: &str = "https://api.atlassian.com";

/// A ready-made credential attached to every request.
#[derive(Clone)]
pub enum Credential {
    /// OAuth 2.0 (3LO) access token or SCIM directory API key.
    Bearer(String),
    /// Account email plus API token.
    Basic { email: String, api_token: String },
}

impl Credential {
    /// Basic credentials from an account email and API token.
    pub fn basic(email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Credential::Basic {
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    /// A bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::Bearer(token.into())
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::Basic { email, api_token } => request.basic_auth(email, api_token),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Credential::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("api_token", &"[REDACTED]")
                .finish(),
        }
    }
}

/// The fetch function behind every paginated endpoint of this client.
pub type PageFetcher<T> = Box<dyn FnMut(Cursor) -> BoxFuture<'static, Result<Page<T>>> + Send>;

/// Atlassian Cloud API client bound to one site.
///
/// # Example
///
/// ```rust,ignore
/// use atl_client::{AtlassianClient, Credential, PageIdiom, StartAtPage};
///
/// let client = AtlassianClient::new(
///     "https://your-domain.atlassian.net",
///     Credential::basic("me@example.com", api_token),
/// )?;
///
/// let issue: serde_json::Value = client.get_json(&client.jira_url("issue/ABC-1")).await?;
///
/// let comments: Vec<serde_json::Value> = client
///     .paginate::<_, StartAtPage<_>>(client.jira_url("issue/ABC-1/comment"), vec![], PageIdiom::StartAtTotal)
///     .collect_all()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct AtlassianClient {
    http: HttpClient,
    site_url: String,
    admin_url: String,
    credential: Credential,
}

impl AtlassianClient {
    /// Create a client for `site_url` (e.g. `https://your-domain.atlassian.net`).
    pub fn new(site_url: impl Into<String>, credential: Credential) -> Result<Self> {
        Self::with_config(site_url, credential, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        site_url: impl Into<String>,
        credential: Credential,
        config: ClientConfig,
    ) -> Result<Self> {
        let site_url = normalize_base(site_url.into())?;
        let http = HttpClient::new(config)?;
        Ok(Self {
            http,
            site_url,
            admin_url: DEFAULT_ADMIN_URL.to_string(),
            credential,
        })
    }

    /// Point SCIM calls at a different Admin API host.
    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Result<Self> {
        self.admin_url = normalize_base(admin_url.into())?;
        Ok(self)
    }

    /// The site URL, without a trailing slash.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// The Admin API URL, without a trailing slash.
    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs pass through; anything else is joined to the site URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.site_url, path.trim_start_matches('/'))
        }
    }

    /// Jira platform REST v3: `jira_url("issue/ABC-1")`.
    pub fn jira_url(&self, path: &str) -> String {
        format!("{}/rest/api/3/{}", self.site_url, path.trim_start_matches('/'))
    }

    /// Jira Software (agile) REST.
    pub fn agile_url(&self, path: &str) -> String {
        format!(
            "{}/rest/agile/1.0/{}",
            self.site_url,
            path.trim_start_matches('/')
        )
    }

    /// Confluence REST.
    pub fn confluence_url(&self, path: &str) -> String {
        format!(
            "{}/wiki/rest/api/{}",
            self.site_url,
            path.trim_start_matches('/')
        )
    }

    /// Jira Service Management REST.
    pub fn service_desk_url(&self, path: &str) -> String {
        format!(
            "{}/rest/servicedeskapi/{}",
            self.site_url,
            path.trim_start_matches('/')
        )
    }

    /// Admin SCIM provisioning for one directory. The directory ID is
    /// percent-encoded.
    pub fn scim_url(&self, directory_id: &str, path: &str) -> String {
        format!(
            "{}/scim/directory/{}/{}",
            self.admin_url,
            urlencoding::encode(directory_id),
            path.trim_start_matches('/')
        )
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.credential.apply(self.http.get(url))
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.credential.apply(self.http.post(url)).no_check()
    }

    /// Create a PUT request builder with authentication.
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.credential.apply(self.http.put(url)).no_check()
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.credential.apply(self.http.delete(url)).no_check()
    }

    /// Execute a request and return the buffered envelope, whatever its
    /// status.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Envelope> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        self.http.execute(request).await?.decode()
    }

    /// GET request with query parameters and JSON response.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.get(&self.url(url)).query_pairs(query.iter().copied());
        self.http.execute(request).await?.decode()
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)).json(body)?;
        self.http.execute(request).await?.decode()
    }

    /// PUT request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.put(&self.url(url)).json(body)?;
        self.http.execute(request).await?.decode()
    }

    /// DELETE request. Any 2xx, usually 204, is success.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url));
        self.http.execute(request).await?.error_for_status()?;
        Ok(())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Traverse a paginated endpoint, decoding each page as `W`.
    ///
    /// `query` is sent with every offset-addressed page, followed by the
    /// idiom's offset and size parameters. Pages reached through a `next`
    /// link are fetched exactly as linked.
    pub fn paginate<T, W>(
        &self,
        url: impl Into<String>,
        query: Vec<(String, String)>,
        idiom: PageIdiom,
    ) -> Paginator<PageFetcher<T>>
    where
        T: Send + 'static,
        W: DeserializeOwned + IntoPage<T> + Send + 'static,
    {
        let client = self.clone();
        let url = url.into();
        let fetch: PageFetcher<T> = Box::new(move |cursor| {
            let client = client.clone();
            let url = url.clone();
            let query = query.clone();
            async move { client.fetch_page::<T, W>(&url, &query, idiom, cursor).await }.boxed()
        });
        Paginator::new(fetch, idiom.first_cursor())
    }

    async fn fetch_page<T, W>(
        &self,
        url: &str,
        query: &[(String, String)],
        idiom: PageIdiom,
        cursor: Cursor,
    ) -> Result<Page<T>>
    where
        W: DeserializeOwned + IntoPage<T>,
    {
        let mut request = match &cursor {
            Cursor::Offset(offset) => self
                .get(&self.url(url))
                .query_pairs(query.iter().cloned())
                .query_pairs(idiom.query(*offset, self.config().page_size)),
            Cursor::Link(link) => {
                let link = self.url(link);
                self.ensure_own_origin(&link)?;
                self.get(&link)
            }
        };
        if idiom == PageIdiom::IndexedTotal {
            request = request.scim();
        }

        let envelope = self.http.execute(request).await?;
        let wire: W = envelope.decode()?;
        Ok(wire.into_page().anchored(envelope.endpoint()))
    }

    /// Server-chosen links are only followed to the site or the Admin API,
    /// the hosts the credential belongs to.
    fn ensure_own_origin(&self, link: &str) -> Result<()> {
        let origin = url::Url::parse(link)?.origin();
        let own = [&self.site_url, &self.admin_url]
            .into_iter()
            .filter_map(|base| url::Url::parse(base).ok())
            .any(|base| base.origin() == origin);

        if own {
            Ok(())
        } else {
            warn!(link, "Refusing to follow pagination link to a foreign origin");
            Err(Error::new(ErrorKind::Config(format!(
                "Pagination link points outside the site: {}",
                origin.ascii_serialization()
            ))))
        }
    }
}

fn normalize_base(url: String) -> Result<String> {
    let parsed = url::Url::parse(url.trim())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::new(ErrorKind::Config(format!(
            "Unsupported URL scheme: {}",
            parsed.scheme()
        ))));
    }
    Ok(url.trim().trim_end_matches('/').to_string())
}
