//! # atl-client
//!
//! Core HTTP infrastructure for Atlassian Cloud APIs.
//!
//! This crate provides what every product endpoint builds on:
//! - Response envelopes that keep the raw body next to a typed decode step
//! - Classification of error responses into a closed [`ErrorKind`] set
//! - Fail-fast validation of required request fields
//! - One lazy pagination engine over Atlassian's three page idioms
//! - Connection pooling, compression and request tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (atl-rest: Jira, Confluence, Service Desk, Admin SCIM)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   AtlassianClient                           │
//! │  - Holds site URL + credential + HTTP client                │
//! │  - Per-product URL builders                                 │
//! │  - Typed JSON methods and paginate()                        │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                             │
//!                 ▼                             ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │         HttpClient            │ │        Paginator          │
//! │  - Request → Envelope         │ │  - Cursor → Page stream   │
//! │  - No retries                 │ │  - Sequential or bulk     │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │         Envelope ──decode──▶ T    /    classify ──▶ Error   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use atl_client::{AtlassianClient, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AtlassianClient::new(
//!         "https://your-domain.atlassian.net",
//!         Credential::basic("me@example.com", std::env::var("ATLASSIAN_API_TOKEN")?),
//!     )?;
//!
//!     let me: serde_json::Value = client.get_json(&client.jira_url("myself")).await?;
//!     println!("{}", me["displayName"]);
//!
//!     Ok(())
//! }
//! ```

mod atlassian_client;
mod classify;
mod client;
mod config;
mod error;
mod page;
mod paginate;
mod request;
mod response;
mod validate;

pub use atlassian_client::{AtlassianClient, Credential, PageFetcher, DEFAULT_ADMIN_URL};
pub use classify::classify;
pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BULK_WORKERS, DEFAULT_PAGE_SIZE};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use page::{
    Continuation, Cursor, IndexedPage, IntoPage, LinkSet, OffsetLimitPage, Page, PageDescriptor,
    PageIdiom, PlannedCursors, StartAtPage,
};
pub use paginate::{Paginator, TraversedPage};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Envelope;
pub use validate::{validate, Required, Requirements};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("atl-api/", env!("CARGO_PKG_VERSION"));
