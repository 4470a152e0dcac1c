//! Quota guard for sequential page fetches.

use super::fetcher::QuotaSnapshot;
use crate::error::{Result, SyncError};

/// Decides whether the next request may be issued.
///
/// The decision uses the previous response's numbers: if repeating its cost
/// would exceed what is left, the sync stops instead of waiting. The first
/// request of a run is always allowed.
#[derive(Debug, Clone, Default)]
pub struct RateLimitGuard {
    last: Option<QuotaSnapshot>,
}

impl RateLimitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the last recorded snapshot before issuing a request.
    pub fn check(&self) -> Result<()> {
        if let Some(quota) = self.last
            && quota.cost > quota.remaining
        {
            tracing::debug!(
                cost = quota.cost,
                remaining = quota.remaining,
                "Refusing request: quota would be exceeded"
            );
            return Err(SyncError::RateLimitExceeded {
                cost: quota.cost,
                remaining: quota.remaining,
            });
        }
        Ok(())
    }

    /// Record the quota reported by the latest response.
    #[inline]
    pub fn record(&mut self, quota: QuotaSnapshot) {
        self.last = Some(quota);
    }

    /// The most recently recorded snapshot.
    #[inline]
    pub fn last(&self) -> Option<QuotaSnapshot> {
        self.last
    }
}
