//! Atlassian REST API client.
//!
//! This client wraps `AtlassianClient` from `atl-client` and provides typed
//! methods for Jira, Confluence, Jira Service Management and the Admin SCIM
//! API. Every method validates its required identifiers before any request
//! is built.

use atl_client::{AtlassianClient, ClientConfig, Credential, PageFetcher, Paginator};

use crate::Result;

mod confluence;
mod jira;
mod scim;
mod service_desk;

/// A lazy traversal over one list endpoint.
pub type Listing<T> = Paginator<PageFetcher<T>>;

/// Atlassian Cloud REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use atl_rest::{AtlassianRestClient, Credential, NewComment};
///
/// let client = AtlassianRestClient::new(
///     "https://your-domain.atlassian.net",
///     Credential::basic("me@example.com", api_token),
/// )?;
///
/// // Jira
/// let issue = client.get_issue("ABC-1").await?;
/// client.add_comment("ABC-1", &NewComment::text("Fixed in 2.3")).await?;
///
/// // Confluence, streamed page by page
/// let pages = client.space_content("ENG")?.collect_all().await?;
///
/// // SCIM, four pages in flight
/// let users = client.scim_users_bulk("dir-id", 4)?;
/// ```
#[derive(Debug, Clone)]
pub struct AtlassianRestClient {
    client: AtlassianClient,
}

impl AtlassianRestClient {
    /// Create a new REST client for a site.
    pub fn new(site_url: impl Into<String>, credential: Credential) -> Result<Self> {
        let client = AtlassianClient::new(site_url, credential)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        site_url: impl Into<String>,
        credential: Credential,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = AtlassianClient::with_config(site_url, credential, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing AtlassianClient.
    pub fn from_client(client: AtlassianClient) -> Self {
        Self { client }
    }

    /// Point SCIM calls at a different Admin API host.
    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Result<Self> {
        self.client = self.client.with_admin_url(admin_url)?;
        Ok(self)
    }

    /// Get the underlying AtlassianClient.
    pub fn inner(&self) -> &AtlassianClient {
        &self.client
    }

    /// Get the site URL.
    pub fn site_url(&self) -> &str {
        self.client.site_url()
    }
}

/// Percent-encode one path segment.
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value.trim())
}
