use chrono::{DateTime, Utc};
use serde::Serialize;

/// The repository a sync run targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Repository owner (user or organization login).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Get the full name (owner/name).
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A grouped reaction: the reaction kind and how many users left it.
///
/// The count is a snapshot and replaces whatever was stored before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reaction {
    /// Reaction content, e.g. `THUMBS_UP`.
    pub reaction: String,
    pub count: i64,
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: String,
    /// Author login, `None` for deleted accounts.
    pub author: Option<String>,
    pub author_association: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub reactions: Vec<Reaction>,
}

/// An issue and its owned comments and reactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Opaque node id.
    pub id: String,
    pub number: i64,
    pub owner: String,
    pub repository: String,
    pub author: Option<String>,
    pub author_association: String,
    pub title: String,
    pub body: String,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,

    // ─── State ───────────────────────────────────────────────────────────────
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub closed_at: Option<DateTime<Utc>>,
    /// Actor of the most recent close event.
    pub closed_by: Option<String>,

    /// Label names in the order the API returned them.
    pub labels: Vec<String>,
    pub comments: Vec<Comment>,
    pub reactions: Vec<Reaction>,
}

/// A submitted review on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub author: Option<String>,
    pub author_association: String,
    pub body: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A file touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    pub path: String,
    pub additions: i64,
    pub deletions: i64,
}

/// A pull request and its owned child collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pub id: String,
    pub number: i64,
    pub owner: String,
    pub repository: String,
    pub author: Option<String>,
    pub author_association: String,
    pub title: String,
    pub body: String,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,

    // ─── State ───────────────────────────────────────────────────────────────
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub closed_at: Option<DateTime<Utc>>,
    pub closed_by: Option<String>,
    pub merged: bool,
    pub merged_at: Option<DateTime<Utc>>,
    pub merged_by: Option<String>,
    /// `MERGEABLE`, `CONFLICTING` or `UNKNOWN`.
    pub mergeable: String,
    pub review_decision: Option<String>,

    // ─── Diff ────────────────────────────────────────────────────────────────
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub base_ref_name: String,
    pub head_ref_name: String,

    pub labels: Vec<String>,
    pub comments: Vec<Comment>,
    pub reactions: Vec<Reaction>,
    pub reviews: Vec<Review>,
    pub files: Vec<ChangedFile>,
}

/// A downloadable asset attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseAsset {
    pub id: String,
    /// Parent release id.
    #[serde(skip)]
    pub release: String,
    pub name: String,
    pub downloads: i64,
    pub size: i64,
}

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub id: String,
    pub owner: String,
    pub repository: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub is_prerelease: bool,
    pub tag: String,
    pub assets: Vec<ReleaseAsset>,
}

/// A count/uniques pair from the traffic API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficSummary {
    pub count: i64,
    pub uniques: i64,
}

/// A popular content path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficPath {
    pub path: String,
    pub title: String,
    pub count: i64,
    pub uniques: i64,
}

/// A popular referring site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficReferrer {
    pub referrer: String,
    pub count: i64,
    pub uniques: i64,
}

/// Point-in-time audience and traffic snapshot for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub owner: String,
    pub repository: String,
    /// Full names of forks.
    pub forks: Vec<String>,
    /// Logins of watchers.
    pub watches: Vec<String>,
    /// Logins of stargazers.
    pub stars: Vec<String>,
    pub clones: TrafficSummary,
    pub views: TrafficSummary,
    pub paths: Vec<TrafficPath>,
    pub referrers: Vec<TrafficReferrer>,
}
