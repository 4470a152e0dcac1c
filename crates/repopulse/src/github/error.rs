//! GitHub transport error types.

use thiserror::Error;

use crate::error::SyncError;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Authentication failed (HTTP {status})")]
    AuthFailed { status: u16 },

    /// The repository or node does not exist or is not visible to the token.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response carried a non-empty `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl GitHubError {
    /// Whether repeating the same request could succeed.
    ///
    /// Network failures and server-side errors are transient. Everything the
    /// server answered deliberately is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status >= 500,
            Self::Api(e) => is_transient_octocrab_error(e),
            Self::AuthFailed { .. } | Self::NotFound(_) | Self::GraphQl(_) | Self::Decode(_) => {
                false
            }
        }
    }
}

fn is_transient_octocrab_error(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => source.status_code.is_server_error(),
        octocrab::Error::Service { .. } => true,
        _ => false,
    }
}

impl From<GitHubError> for SyncError {
    fn from(err: GitHubError) -> Self {
        SyncError::transport(err.to_string())
    }
}
