use repopulse::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::Started { kind, repo, since } => {
                tracing::info!(kind = %kind, repo = %repo, since = ?since, "Sync started");
            }

            SyncProgress::FetchedPage {
                kind,
                page,
                count,
                remaining,
            } => {
                tracing::debug!(kind = %kind, page, count, remaining, "Fetched page");
            }

            SyncProgress::FetchedComments {
                kind,
                number,
                count,
            } => {
                tracing::debug!(kind = %kind, number, count, "Fetched comments");
            }

            SyncProgress::FetchComplete { kind, total, stop } => {
                tracing::info!(kind = %kind, total, stop = ?stop, "Fetch complete");
            }

            SyncProgress::Persisted {
                kind,
                id,
                persisted,
                total,
            } => {
                tracing::debug!(kind = %kind, id = %id, persisted, total, "Persisted");
            }

            SyncProgress::WatermarkAdvanced { kind, watermark } => {
                tracing::debug!(kind = %kind, watermark = %watermark, "Watermark advanced");
            }

            SyncProgress::FetchingMetrics { repo } => {
                tracing::info!(repo = %repo, "Fetching metrics");
            }

            SyncProgress::MetricsPersisted {
                repo,
                paths,
                referrers,
            } => {
                tracing::info!(repo = %repo, paths, referrers, "Metrics persisted");
            }

            SyncProgress::Retrying {
                operation,
                retry_after_ms,
                attempt,
            } => {
                tracing::warn!(
                    operation = %operation,
                    retry_after_ms,
                    attempt,
                    "Transient failure, retrying"
                );
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
