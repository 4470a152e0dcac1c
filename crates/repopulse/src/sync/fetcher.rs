//! The page-fetching seam between the sync engine and a transport.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::types::EntityKind;
use crate::activity::RepoRef;
use crate::error::Result;

/// Continuation state of a remote connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Quota figures reported alongside a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct QuotaSnapshot {
    /// Points charged for the request that produced this snapshot.
    pub cost: i64,
    /// Points left in the current window.
    pub remaining: i64,
}

/// One page of raw nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub nodes: Vec<Value>,
    pub page_info: PageInfo,
    pub quota: QuotaSnapshot,
}

/// A request for one primary page of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: EntityKind,
    pub repo: RepoRef,
    /// Server-side filter; only ever set for kinds that support it.
    pub since: Option<DateTime<Utc>>,
    pub after: Option<String>,
    pub first: u32,
}

/// A request for a continuation page of one node's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPageRequest {
    /// Kind of the parent node.
    pub kind: EntityKind,
    pub repo: RepoRef,
    /// Issue or pull request number.
    pub number: i64,
    pub after: String,
    pub first: u32,
}

/// Raw responses of the snapshot (non-paginated) metrics calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetrics {
    pub clones: Value,
    pub views: Value,
    pub paths: Value,
    pub referrers: Value,
    pub forks: Value,
    pub stargazers: Value,
    pub watchers: Value,
}

/// Fetches pages of raw nodes from the remote API.
///
/// Implementations only issue read requests and may retry them at the
/// transport level. Quota policy lives in the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one primary page.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page>;

    /// Fetch one continuation page of a node's comments.
    async fn fetch_comments(&self, request: &CommentPageRequest) -> Result<Page>;

    /// Fetch the traffic and audience snapshot.
    async fn fetch_metrics(&self, repo: &RepoRef) -> Result<RawMetrics>;
}
