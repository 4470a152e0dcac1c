//! Transport-level retry policy.
//!
//! Only idempotent reads go through here: a page request that failed on the
//! network or with a 5xx is safe to repeat with the same cursor. Rate-limit
//! decisions, authentication failures and GraphQL errors are never retried.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::error::short_error_message;
use crate::sync::{ProgressCallback, SyncProgress, emit};

/// Delay before the first retry.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Upper bound on any single delay.
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Total attempts, counting the first.
pub const MAX_ATTEMPTS: usize = 3;

/// Exponential backoff for transient transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub ceiling: Duration,
    /// Total attempts; 1 disables retrying.
    pub attempts: usize,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: INITIAL_BACKOFF,
            ceiling: MAX_BACKOFF,
            attempts: MAX_ATTEMPTS,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// A single attempt.
    #[must_use]
    pub fn none() -> Self {
        Self {
            attempts: 1,
            ..Self::default()
        }
    }

    /// Short fixed delays without jitter, for tests against local servers.
    #[must_use]
    pub fn immediate(attempts: usize) -> Self {
        Self {
            initial: Duration::from_millis(1),
            ceiling: Duration::from_millis(5),
            attempts,
            jitter: false,
        }
    }

    fn backoff(&self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_min_delay(self.initial)
            .with_max_delay(self.ceiling)
            .with_max_times(self.attempts.saturating_sub(1));
        if self.jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}

/// Run `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or the policy runs out of attempts.
///
/// Each scheduled retry is logged and reported as [`SyncProgress::Retrying`]
/// with `label` as the operation name.
pub async fn retry_transient<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    label: &str,
    on_progress: Option<&ProgressCallback>,
    is_retryable: R,
    operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error,
    R: FnMut(&E) -> bool,
{
    let mut attempt = 1u32;

    operation
        .retry(policy.backoff())
        .when(is_retryable)
        .notify(|err: &E, delay: Duration| {
            tracing::warn!(
                operation = label,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Transient failure, retrying: {}",
                short_error_message(err)
            );
            emit(
                on_progress,
                SyncProgress::Retrying {
                    operation: label.to_string(),
                    retry_after_ms: delay.as_millis() as u64,
                    attempt,
                },
            );
            attempt += 1;
        })
        .await
}
