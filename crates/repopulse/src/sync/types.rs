//! Shared sync types and constants.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::RepoRef;

/// Nodes requested per primary page.
pub const PAGE_SIZE: u32 = 50;

/// Nodes requested per secondary comment page.
pub const COMMENT_PAGE_SIZE: u32 = 50;

/// Size of nested slices (comments, labels, reviews, files, assets)
/// embedded in each primary node.
pub const NESTED_PAGE_SIZE: u32 = 100;

/// The paginated entity collections a sync can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Issues,
    #[serde(rename = "pullrequests")]
    PullRequests,
    Releases,
}

/// Order in which the remote returns a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::PullRequests => "pullrequests",
            Self::Releases => "releases",
        }
    }

    /// Whether the remote applies the `since` filter itself.
    ///
    /// Kinds filtered remotely are requested oldest-first and need no client
    /// cutoff; the rest are requested newest-first and stop at the first
    /// entity older than the cutoff.
    #[inline]
    pub fn filters_server_side(self) -> bool {
        matches!(self, Self::Issues)
    }

    #[inline]
    pub fn sort_order(self) -> SortOrder {
        if self.filters_server_side() {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    /// Whether a per-repository watermark is stored for this kind.
    #[inline]
    pub fn tracks_watermark(self) -> bool {
        matches!(self, Self::Issues | Self::PullRequests)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one sync invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub repo: RepoRef,
    /// Explicit lower bound. When unset and persisting, the stored
    /// watermark is used instead.
    pub since: Option<DateTime<Utc>>,
    /// Maximum entities to collect; 0 means unlimited.
    pub limit: usize,
}

impl SyncRequest {
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            since: None,
            limit: 0,
        }
    }

    #[must_use]
    pub fn with_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Check whether `count` collected entities satisfies the limit.
    #[inline]
    pub fn limit_reached(&self, count: usize) -> bool {
        self.limit > 0 && count >= self.limit
    }
}

/// Why pagination stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The remote reported no further page.
    LastPage,
    /// An entity older than the cutoff was reached.
    Exhausted,
    /// The configured limit was reached.
    LimitReached,
}

/// Summary of a completed sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct SyncReport {
    pub kind: EntityKind,
    /// Cutoff the run actually used.
    pub since: Option<DateTime<Utc>>,
    /// Entities collected by pagination.
    pub fetched: usize,
    /// Entities durably committed (always 0 when emitting).
    pub persisted: usize,
    /// Primary pages fetched.
    pub pages: usize,
    pub stop: StopReason,
    /// Stored watermark after the run, for kinds that track one.
    pub watermark: Option<DateTime<Utc>>,
}
