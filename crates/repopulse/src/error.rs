//! Error taxonomy for sync runs.
//!
//! Every variant is terminal at the orchestrator: nothing is retried or
//! skipped at the entity level. Transport-level retries happen below this
//! layer (see [`crate::retry`]).

use sea_orm::DbErr;
use thiserror::Error;

use crate::sync::EntityKind;

/// Errors that can terminate a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network, authentication, or protocol failure talking to the remote API.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The previous page reported a cost that the remaining quota cannot cover.
    #[error("Rate limit would be exceeded: last page cost {cost}, {remaining} remaining")]
    RateLimitExceeded { cost: i64, remaining: i64 },

    /// A remote node did not match the expected shape.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The store rejected a write or the connection was lost.
    #[error("Persistence error: {0}")]
    Persistence(#[from] DbErr),
}

impl SyncError {
    /// Create a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Check if this error came from the rate limit guard.
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

/// A raw API node could not be turned into a canonical entity.
#[derive(Debug, Error)]
#[error("Mapping error ({kind}): {message}")]
pub struct MappingError {
    /// What was being mapped.
    pub kind: MappedKind,
    /// Decoder or validation message.
    pub message: String,
}

impl MappingError {
    /// Create a mapping error for the given node kind.
    pub fn new(kind: impl Into<MappedKind>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// The node kinds the mapper understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedKind {
    Entity(EntityKind),
    Comment,
    Metrics,
}

impl From<EntityKind> for MappedKind {
    fn from(kind: EntityKind) -> Self {
        Self::Entity(kind)
    }
}

impl std::fmt::Display for MappedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entity(kind) => write!(f, "{kind}"),
            Self::Comment => write!(f, "comment"),
            Self::Metrics => write!(f, "metrics"),
        }
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which keeps log lines compact
/// when a driver error embeds multi-line details.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
