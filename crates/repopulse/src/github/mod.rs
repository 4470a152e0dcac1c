//! GitHub transport.
//!
//! [`GitHubClient`] implements [`crate::sync::PageFetcher`]: GraphQL v4 for
//! issues, pull requests, releases and comment continuations, and REST v3
//! (through octocrab) for the traffic and audience snapshot.
//!
//! # Module Structure
//!
//! - [`error`] - Transport error types and the retry predicate
//! - [`query`] - GraphQL documents and variables
//! - [`client`] - The client and its `PageFetcher` implementation
//!
//! ```ignore
//! use repopulse::github::GitHubClient;
//! use repopulse::sync::{Sink, SyncRequest, sync_pull_requests};
//!
//! let client = GitHubClient::new(&token)?;
//! let outcome = sync_pull_requests(&client, &request, Sink::Emit, None).await?;
//! ```

mod client;
mod error;
mod query;

pub use client::{DEFAULT_ENDPOINT, GitHubClient, create_client};
pub use error::GitHubError;
