//! Per-repository high-water marks.

use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::EntityKind;
use crate::activity::RepoRef;
use crate::error::Result;
use crate::persist::store_watermark;

/// Stored resumption state for one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermark {
    pub issues: Option<DateTime<Utc>>,
    pub pull_requests: Option<DateTime<Utc>>,
}

impl Watermark {
    /// The mark for `kind`; releases never have one.
    pub fn get(&self, kind: EntityKind) -> Option<DateTime<Utc>> {
        match kind {
            EntityKind::Issues => self.issues,
            EntityKind::PullRequests => self.pull_requests,
            EntityKind::Releases => None,
        }
    }
}

/// Advances one kind's mark as entities are committed.
///
/// The mark only moves forward and is written through right after each
/// advance, so a crash replays at most the entities not yet committed.
#[derive(Debug, Clone)]
pub struct WatermarkTracker {
    repo: RepoRef,
    kind: EntityKind,
    mark: Option<DateTime<Utc>>,
}

impl WatermarkTracker {
    pub fn new(repo: RepoRef, kind: EntityKind, mark: Option<DateTime<Utc>>) -> Self {
        Self { repo, kind, mark }
    }

    /// Current mark.
    #[inline]
    pub fn current(&self) -> Option<DateTime<Utc>> {
        self.mark
    }

    /// Whether `at` would move the mark.
    #[inline]
    pub fn would_advance(&self, at: DateTime<Utc>) -> bool {
        self.mark.is_none_or(|mark| at > mark)
    }

    /// Record a committed entity's timestamp, persisting the mark if it moved.
    ///
    /// Returns whether the mark advanced.
    pub async fn observe<C: ConnectionTrait>(
        &mut self,
        db: &C,
        at: DateTime<Utc>,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<bool> {
        if !self.would_advance(at) {
            return Ok(false);
        }

        store_watermark(db, &self.repo, self.kind, at).await?;
        self.mark = Some(at);

        tracing::debug!(kind = %self.kind, repo = %self.repo, watermark = %at, "Advanced watermark");
        emit(
            on_progress,
            SyncProgress::WatermarkAdvanced {
                kind: self.kind,
                watermark: at,
            },
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_watermark_get_by_kind() {
        let mark = Watermark {
            issues: Some(at(1)),
            pull_requests: Some(at(2)),
        };
        assert_eq!(mark.get(EntityKind::Issues), Some(at(1)));
        assert_eq!(mark.get(EntityKind::PullRequests), Some(at(2)));
        assert_eq!(mark.get(EntityKind::Releases), None);
    }

    #[test]
    fn test_would_advance_is_strict() {
        let repo = RepoRef::new("acme", "widgets");
        let tracker = WatermarkTracker::new(repo.clone(), EntityKind::Issues, Some(at(5)));
        assert!(!tracker.would_advance(at(4)));
        assert!(!tracker.would_advance(at(5)));
        assert!(tracker.would_advance(at(6)));

        let empty = WatermarkTracker::new(repo, EntityKind::Issues, None);
        assert!(empty.would_advance(at(1)));
    }

    #[tokio::test]
    async fn test_observe_writes_only_when_advancing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                last_insert_id: 0,
            }])
            .into_connection();
        let mut tracker =
            WatermarkTracker::new(RepoRef::new("acme", "widgets"), EntityKind::PullRequests, Some(at(3)));

        assert!(!tracker.observe(&db, at(2), None).await.unwrap());
        assert!(tracker.observe(&db, at(9), None).await.unwrap());
        assert_eq!(tracker.current(), Some(at(9)));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("github_metadata"));
        assert!(log.contains("pullrequests_updated_at"));
    }
}
