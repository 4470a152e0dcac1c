//! The synchronization engine.
//!
//! # Module Structure
//!
//! - [`types`] - Core types: `EntityKind`, `SyncRequest`, `SyncReport`, constants
//! - [`fetcher`] - The `PageFetcher` seam implemented by transports
//! - [`rate_limit`] - `RateLimitGuard`, the one-page-stale quota check
//! - [`pagination`] - The generic pagination driver
//! - [`watermark`] - Monotonic per-repository high-water marks
//! - [`engine`] - Orchestration: `sync_issues()`, `sync_pull_requests()`, ...
//! - [`progress`] - Progress reporting: `SyncProgress`, `ProgressCallback`, `emit()`
//!
//! # Example
//!
//! ```ignore
//! use repopulse::activity::RepoRef;
//! use repopulse::sync::{Sink, SyncRequest, sync_issues};
//!
//! let request = SyncRequest::new(RepoRef::new("rust-lang", "rust")).with_limit(100);
//! let outcome = sync_issues(&client, &request, Sink::Persist(&db), None).await?;
//! println!("{} issues, watermark {:?}", outcome.report.persisted, outcome.report.watermark);
//! ```

pub mod engine;
pub mod fetcher;
pub mod pagination;
mod progress;
pub mod rate_limit;
mod types;
pub mod watermark;

pub use types::{
    COMMENT_PAGE_SIZE, EntityKind, NESTED_PAGE_SIZE, PAGE_SIZE, SortOrder, StopReason,
    SyncReport, SyncRequest,
};

pub use progress::{ProgressCallback, SyncProgress, emit};

pub use engine::{
    Sink, SyncOutcome, sync_entities, sync_issues, sync_metrics, sync_pull_requests,
    sync_releases,
};
pub use fetcher::{CommentPageRequest, Page, PageFetcher, PageInfo, PageRequest, QuotaSnapshot, RawMetrics};
pub use pagination::{Collected, CommentCursor, Mapped, Paginated, paginate};
pub use rate_limit::RateLimitGuard;
pub use watermark::{Watermark, WatermarkTracker};
