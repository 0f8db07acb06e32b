//! # atl-api
//!
//! An Atlassian Cloud REST client library for Rust.
//!
//! One authenticated client reaches Jira, Confluence, Jira Service
//! Management and the Admin SCIM API. Every list endpoint is exposed as a
//! lazy, restartable stream over its pages, whichever pagination idiom the
//! product uses.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages have bearer and API tokens scrubbed
//!
//! ## Crates
//!
//! - **atl-client** - HTTP transport, request validation, error classification, pagination
//! - **atl-rest** - Jira, Confluence, Service Desk and SCIM endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atl_api::{AtlassianRestClient, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AtlassianRestClient::new(
//!         "https://your-domain.atlassian.net",
//!         Credential::basic("me@example.com", std::env::var("ATLASSIAN_API_TOKEN")?),
//!     )?;
//!
//!     // Fetch four pages at a time, items still arrive in order
//!     let issues: Vec<_> = futures::TryStreamExt::try_collect(
//!         client.search_issues("assignee = currentUser()")?.bulk(4),
//!     )
//!     .await?;
//!
//!     for issue in issues {
//!         println!("{} {}", issue.key, issue.summary().unwrap_or_default());
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use atl_client as client;
#[cfg(feature = "rest")]
pub use atl_rest as rest;

#[cfg(feature = "client")]
pub use atl_client::{AtlassianClient, ClientConfig, Credential, Error, ErrorKind};
#[cfg(feature = "rest")]
pub use atl_rest::AtlassianRestClient;
