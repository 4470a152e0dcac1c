//! Repopulse - incremental GitHub activity sync into a relational store.
//!
//! Issues, pull requests, releases and repository traffic are paged out of
//! the GitHub API, mapped into canonical entities, and upserted into SQLite
//! or PostgreSQL. A per-repository watermark lets each run resume where the
//! previous one stopped.
//!
//! # Features
//!
//! - `github` - The GitHub transport ([`github::GitHubClient`]).
//! - `sqlite`, `postgres` - Database drivers.
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to create the schema on connection.
//!
//! # Example
//!
//! ```ignore
//! use repopulse::activity::RepoRef;
//! use repopulse::github::GitHubClient;
//! use repopulse::sync::{Sink, SyncRequest, sync_issues};
//! use repopulse::connect_and_migrate;
//!
//! let db = connect_and_migrate("sqlite://repopulse.db?mode=rwc").await?;
//! let client = GitHubClient::new(&token)?;
//!
//! let request = SyncRequest::new(RepoRef::new("rust-lang", "rust"));
//! let outcome = sync_issues(&client, &request, Sink::Persist(&db), None).await?;
//! ```

pub mod activity;
pub mod db;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod persist;
pub mod sync;

#[cfg(feature = "github")]
pub mod retry;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::{PoolOptions, connect, connect_with};
#[cfg(feature = "migrate")]
pub use db::{connect_and_migrate, connect_and_migrate_with};
pub use error::{MappingError, Result, SyncError};
