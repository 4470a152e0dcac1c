//! Progress reporting types for sync operations.
//!
//! The library never prints; callers turn these events into log lines or
//! spinners.

use chrono::{DateTime, Utc};

use super::types::{EntityKind, StopReason};

/// Progress events emitted during sync operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// A paginated sync is starting.
    Started {
        kind: EntityKind,
        /// `owner/name` of the repository.
        repo: String,
        /// Cutoff in effect, if any.
        since: Option<DateTime<Utc>>,
    },

    /// Fetched a primary page.
    FetchedPage {
        kind: EntityKind,
        /// Page number (1-indexed).
        page: usize,
        /// Nodes on this page.
        count: usize,
        /// Quota left after this page.
        remaining: i64,
    },

    /// Fetched a continuation page of a node's comments.
    FetchedComments {
        kind: EntityKind,
        /// Issue or pull request number.
        number: i64,
        /// Comments on this page.
        count: usize,
    },

    /// Pagination finished.
    FetchComplete {
        kind: EntityKind,
        /// Entities collected.
        total: usize,
        stop: StopReason,
    },

    /// One entity and its children were committed.
    Persisted {
        kind: EntityKind,
        id: String,
        /// Running count of committed entities.
        persisted: usize,
        /// Entities to commit in this batch.
        total: usize,
    },

    /// The stored watermark moved forward.
    WatermarkAdvanced {
        kind: EntityKind,
        watermark: DateTime<Utc>,
    },

    /// Fetching the metrics snapshot.
    FetchingMetrics {
        /// `owner/name` of the repository.
        repo: String,
    },

    /// The metrics snapshot was written.
    MetricsPersisted {
        /// `owner/name` of the repository.
        repo: String,
        paths: usize,
        referrers: usize,
    },

    /// A transport request failed transiently and will be retried.
    Retrying {
        /// What was being requested.
        operation: String,
        retry_after_ms: u64,
        attempt: u32,
    },
}

/// Type alias for progress callback functions.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
///
/// ```ignore
/// use repopulse::sync::{emit, SyncProgress, ProgressCallback};
///
/// fn report(on_progress: Option<&ProgressCallback>) {
///     emit(on_progress, SyncProgress::FetchingMetrics { repo: "acme/widgets".into() });
/// }
/// ```
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
