//! # atl-rest
//!
//! Atlassian Cloud REST endpoints with fail-fast validation and streaming
//! pagination.
//!
//! ## Features
//!
//! - **Jira** - Issues, comments, JQL search, project versions, worklogs
//! - **Confluence** - Content, spaces, labels, child content
//! - **Jira Service Management** - Service desks, queues, customer requests
//! - **Admin SCIM** - Provisioned users and groups, with bulk traversal
//!
//! List endpoints return a [`Listing`]: a lazy
//! [`Paginator`](atl_client::Paginator) that issues no request until it is
//! polled.
//!
//! ## Example
//!
//! ```rust,ignore
//! use atl_rest::{AtlassianRestClient, Credential, NewComment};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), atl_rest::Error> {
//!     let client = AtlassianRestClient::new(
//!         "https://your-domain.atlassian.net",
//!         Credential::basic("me@example.com", "api-token"),
//!     )?;
//!
//!     // Stream a JQL search, one page at a time
//!     let mut issues =
//!         std::pin::pin!(client.search_issues("project = ABC AND status = Open")?.items());
//!     while let Some(issue) = issues.try_next().await? {
//!         println!("{} {}", issue.key, issue.summary().unwrap_or_default());
//!     }
//!
//!     // Comment
//!     client
//!         .add_comment("ABC-1", &NewComment::text("Triaged"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
pub mod confluence;
pub mod jira;
pub mod scim;
pub mod service_desk;

pub use client::{AtlassianRestClient, Listing};
pub use confluence::{ChildType, Content, Label, Space};
pub use jira::{Comment, Issue, NewComment, User, Version, Worklog};
pub use scim::{ScimEmail, ScimGroup, ScimMember, ScimUser};
pub use service_desk::{CustomerRequest, Queue, RequestComment, ServiceDesk};

// Re-export commonly used types from atl-client
pub use atl_client::{ClientConfig, Credential, Error, ErrorKind, Result};
