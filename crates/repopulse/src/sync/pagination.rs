//! Cursor pagination with cutoff, limit and quota policies.
//!
//! Page fetches are strictly sequential: each request depends on the
//! previous page's cursor and quota snapshot.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fetcher::{CommentPageRequest, PageFetcher, PageRequest};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::rate_limit::RateLimitGuard;
use super::types::{COMMENT_PAGE_SIZE, EntityKind, PAGE_SIZE, StopReason, SyncRequest};
use crate::activity::RepoRef;
use crate::error::{MappedKind, MappingError, Result};

/// Where a node's embedded comment slice left off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCursor {
    /// Issue or pull request number.
    pub number: i64,
    pub after: String,
}

/// A mapped node, plus the comment continuation it still needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub entity: T,
    pub more_comments: Option<CommentCursor>,
}

impl<T> Mapped<T> {
    /// A node whose children are already complete.
    pub fn complete(entity: T) -> Self {
        Self {
            entity,
            more_comments: None,
        }
    }
}

/// An entity that can be collected from a paginated connection.
pub trait Paginated: Sized + Send {
    const KIND: EntityKind;

    /// Map one raw node.
    fn from_node(node: Value, repo: &RepoRef) -> std::result::Result<Mapped<Self>, MappingError>;

    /// The timestamp compared against the cutoff and the watermark.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Opaque id, for logging.
    fn id(&self) -> &str;

    /// Append raw comment nodes from continuation pages.
    fn extend_comments(&mut self, _nodes: Vec<Value>) -> std::result::Result<(), MappingError> {
        Err(MappingError::new(
            Self::KIND,
            "comment continuation on a node without comments",
        ))
    }
}

/// What pagination produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
    /// Entities in discovery order.
    pub items: Vec<T>,
    /// Primary pages fetched.
    pub pages: usize,
    pub stop: StopReason,
}

/// Drive a paginated collection to its stop condition.
///
/// `request.since` is sent to the remote for kinds that filter server-side
/// and applied as a client-side cutoff for the others. The cutoff is
/// inclusive: an entity exactly at `since` is kept.
pub async fn paginate<T, F>(
    fetcher: &F,
    request: &SyncRequest,
    on_progress: Option<&ProgressCallback>,
) -> Result<Collected<T>>
where
    T: Paginated,
    F: PageFetcher + ?Sized,
{
    let kind = T::KIND;
    let (server_since, cutoff) = if kind.filters_server_side() {
        (request.since, None)
    } else {
        (None, request.since)
    };

    let mut guard = RateLimitGuard::new();
    let mut after: Option<String> = None;
    let mut items: Vec<T> = Vec::new();
    let mut pages = 0usize;

    loop {
        guard.check()?;
        tracing::debug!(%kind, repo = %request.repo, page = pages + 1, "Fetching page");
        let page = fetcher
            .fetch_page(&PageRequest {
                kind,
                repo: request.repo.clone(),
                since: server_since,
                after: after.take(),
                first: PAGE_SIZE,
            })
            .await?;
        pages += 1;
        guard.record(page.quota);

        emit(
            on_progress,
            SyncProgress::FetchedPage {
                kind,
                page: pages,
                count: page.nodes.len(),
                remaining: page.quota.remaining,
            },
        );

        for node in page.nodes {
            let Mapped {
                mut entity,
                more_comments,
            } = T::from_node(node, &request.repo)?;

            if let Some(cutoff) = cutoff
                && entity.timestamp() < cutoff
            {
                // Newest-first: everything after this node is older still.
                tracing::debug!(%kind, id = entity.id(), %cutoff, "Reached cutoff");
                return Ok(finish(kind, items, pages, StopReason::Exhausted, on_progress));
            }

            if let Some(cursor) = more_comments {
                let extra =
                    fetch_remaining_comments(fetcher, &mut guard, kind, &request.repo, cursor, on_progress)
                        .await?;
                entity.extend_comments(extra)?;
            }

            items.push(entity);
            if request.limit_reached(items.len()) {
                return Ok(finish(kind, items, pages, StopReason::LimitReached, on_progress));
            }
        }

        if !page.page_info.has_next_page {
            return Ok(finish(kind, items, pages, StopReason::LastPage, on_progress));
        }
        match page.page_info.end_cursor {
            Some(cursor) => after = Some(cursor),
            None => {
                return Err(MappingError::new(kind, "hasNextPage set without an endCursor").into());
            }
        }
    }
}

fn finish<T>(
    kind: EntityKind,
    items: Vec<T>,
    pages: usize,
    stop: StopReason,
    on_progress: Option<&ProgressCallback>,
) -> Collected<T> {
    tracing::debug!(%kind, total = items.len(), pages, ?stop, "Pagination finished");
    emit(
        on_progress,
        SyncProgress::FetchComplete {
            kind,
            total: items.len(),
            stop,
        },
    );
    Collected { items, pages, stop }
}

/// Walk a node's comment connection from where its embedded slice ended.
///
/// Same loop as the primary traversal without cutoff or limit. The quota
/// guard is shared with the primary traversal.
async fn fetch_remaining_comments<F>(
    fetcher: &F,
    guard: &mut RateLimitGuard,
    kind: EntityKind,
    repo: &RepoRef,
    cursor: CommentCursor,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<Value>>
where
    F: PageFetcher + ?Sized,
{
    let CommentCursor { number, mut after } = cursor;
    let mut nodes = Vec::new();

    loop {
        guard.check()?;
        tracing::debug!(%kind, %repo, number, "Fetching additional comments");
        let page = fetcher
            .fetch_comments(&CommentPageRequest {
                kind,
                repo: repo.clone(),
                number,
                after,
                first: COMMENT_PAGE_SIZE,
            })
            .await?;
        guard.record(page.quota);

        emit(
            on_progress,
            SyncProgress::FetchedComments {
                kind,
                number,
                count: page.nodes.len(),
            },
        );
        nodes.extend(page.nodes);

        if !page.page_info.has_next_page {
            return Ok(nodes);
        }
        after = page.page_info.end_cursor.ok_or_else(|| {
            MappingError::new(MappedKind::Comment, "hasNextPage set without an endCursor")
        })?;
    }
}
