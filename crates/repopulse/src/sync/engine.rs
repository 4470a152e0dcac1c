//! Sync orchestration.
//!
//! Composes pagination, mapping, persistence and watermark tracking for one
//! entity kind of one repository. Every failure is terminal: the first
//! error aborts the run, and watermark progress already committed for
//! earlier entities is kept.

use sea_orm::DatabaseConnection;

use super::fetcher::PageFetcher;
use super::pagination::{Paginated, paginate};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{SyncReport, SyncRequest};
use super::watermark::WatermarkTracker;
use crate::activity::{Issue, Metrics, PullRequest, Release, RepoRef};
use crate::error::Result;
use crate::mapper::map_metrics;
use crate::persist::{Persist, load_watermark, persist_metrics};

/// Where collected entities go.
#[derive(Debug, Clone, Copy)]
pub enum Sink<'a> {
    /// Keep everything in memory for the caller to render.
    Emit,
    /// Commit each entity as soon as pagination finishes.
    Persist(&'a DatabaseConnection),
}

/// Result of a paginated sync.
#[derive(Debug, Clone)]
#[must_use]
pub struct SyncOutcome<T> {
    pub report: SyncReport,
    /// Entities in discovery order.
    pub items: Vec<T>,
}

/// Sync one paginated entity kind.
///
/// When persisting, the stored watermark is loaded first and used as the
/// cutoff unless the request carries an explicit `since`. An explicit
/// `since` never lowers the stored watermark.
pub async fn sync_entities<T, F>(
    fetcher: &F,
    request: &SyncRequest,
    sink: Sink<'_>,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome<T>>
where
    T: Paginated + Persist,
    F: PageFetcher + ?Sized,
{
    let kind = T::KIND;

    let mut tracker = match sink {
        Sink::Persist(db) if kind.tracks_watermark() => {
            let stored = load_watermark(db, &request.repo).await?;
            Some(WatermarkTracker::new(
                request.repo.clone(),
                kind,
                stored.get(kind),
            ))
        }
        _ => None,
    };

    let since = request
        .since
        .or_else(|| tracker.as_ref().and_then(WatermarkTracker::current));
    let effective = request.clone().with_since(since);

    tracing::info!(%kind, repo = %request.repo, since = ?since, limit = request.limit, "Starting sync");
    emit(
        on_progress,
        SyncProgress::Started {
            kind,
            repo: request.repo.full_name(),
            since,
        },
    );

    let collected = paginate::<T, F>(fetcher, &effective, on_progress).await?;

    let mut persisted = 0usize;
    if let Sink::Persist(db) = sink {
        let total = collected.items.len();
        for entity in &collected.items {
            entity.persist(db).await?;
            persisted += 1;
            emit(
                on_progress,
                SyncProgress::Persisted {
                    kind,
                    id: entity.id().to_string(),
                    persisted,
                    total,
                },
            );

            if let Some(tracker) = tracker.as_mut() {
                tracker.observe(db, entity.timestamp(), on_progress).await?;
            }
        }
    }

    let report = SyncReport {
        kind,
        since,
        fetched: collected.items.len(),
        persisted,
        pages: collected.pages,
        stop: collected.stop,
        watermark: tracker.as_ref().and_then(WatermarkTracker::current),
    };
    tracing::info!(
        %kind,
        repo = %request.repo,
        fetched = report.fetched,
        persisted = report.persisted,
        pages = report.pages,
        stop = ?report.stop,
        "Sync complete"
    );

    Ok(SyncOutcome {
        report,
        items: collected.items,
    })
}

/// Sync issues. The remote filters by `since`, oldest first.
pub async fn sync_issues<F: PageFetcher + ?Sized>(
    fetcher: &F,
    request: &SyncRequest,
    sink: Sink<'_>,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome<Issue>> {
    sync_entities(fetcher, request, sink, on_progress).await
}

/// Sync pull requests, newest first, stopping at the cutoff.
pub async fn sync_pull_requests<F: PageFetcher + ?Sized>(
    fetcher: &F,
    request: &SyncRequest,
    sink: Sink<'_>,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome<PullRequest>> {
    sync_entities(fetcher, request, sink, on_progress).await
}

/// Sync releases, newest first by creation time.
///
/// Releases keep no watermark, so a cutoff only applies when the request
/// carries an explicit `since`.
pub async fn sync_releases<F: PageFetcher + ?Sized>(
    fetcher: &F,
    request: &SyncRequest,
    sink: Sink<'_>,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncOutcome<Release>> {
    sync_entities(fetcher, request, sink, on_progress).await
}

/// Fetch the traffic and audience snapshot, persisting it if asked.
pub async fn sync_metrics<F: PageFetcher + ?Sized>(
    fetcher: &F,
    repo: &RepoRef,
    sink: Sink<'_>,
    on_progress: Option<&ProgressCallback>,
) -> Result<Metrics> {
    emit(
        on_progress,
        SyncProgress::FetchingMetrics {
            repo: repo.full_name(),
        },
    );

    let raw = fetcher.fetch_metrics(repo).await?;
    let metrics = map_metrics(repo, raw)?;

    if let Sink::Persist(db) = sink {
        persist_metrics(db, &metrics).await?;
        emit(
            on_progress,
            SyncProgress::MetricsPersisted {
                repo: repo.full_name(),
                paths: metrics.paths.len(),
                referrers: metrics.referrers.len(),
            },
        );
    }

    Ok(metrics)
}
