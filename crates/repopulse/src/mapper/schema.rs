//! Wire shapes of the nodes the queries select.
//!
//! Field names follow the GraphQL schema (camelCase); the REST traffic
//! payloads are snake_case. Nullable connections are `Option` so a `null`
//! slice maps to an empty collection rather than a decode failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::sync::PageInfo;

#[derive(Debug, Deserialize)]
pub(crate) struct Nodes<T> {
    // A bare `default` would demand `T: Default` of every node type.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Nodes<T> {
    pub fn flatten(connection: Option<Self>) -> Vec<T> {
        connection.map(|c| c.nodes).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Actor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TotalCount {
    pub total_count: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionGroupNode {
    pub content: String,
    pub users: TotalCount,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNode {
    pub name: String,
}

/// `... on ClosedEvent { actor { login } }`; other event types decode empty.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClosedEventNode {
    #[serde(default)]
    pub actor: Option<Actor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentNode {
    pub id: String,
    pub author: Option<Actor>,
    pub author_association: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reaction_groups: Option<Vec<ReactionGroupNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentConnection {
    #[serde(default)]
    pub nodes: Vec<CommentNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueNode {
    pub id: String,
    pub number: i64,
    pub author: Option<Actor>,
    pub author_association: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub comments: CommentConnection,
    #[serde(default)]
    pub reaction_groups: Option<Vec<ReactionGroupNode>>,
    #[serde(default)]
    pub labels: Option<Nodes<LabelNode>>,
    #[serde(default)]
    pub timeline_items: Option<Nodes<ClosedEventNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewNode {
    pub author: Option<Actor>,
    pub author_association: String,
    #[serde(default)]
    pub body: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileNode {
    pub path: String,
    pub additions: i64,
    pub deletions: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestNode {
    pub id: String,
    pub number: i64,
    pub author: Option<Actor>,
    pub author_association: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub merged: bool,
    pub merged_by: Option<Actor>,
    pub mergeable: String,
    pub review_decision: Option<String>,
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub base_ref_name: String,
    pub head_ref_name: String,
    pub comments: CommentConnection,
    #[serde(default)]
    pub reaction_groups: Option<Vec<ReactionGroupNode>>,
    #[serde(default)]
    pub labels: Option<Nodes<LabelNode>>,
    #[serde(default)]
    pub reviews: Option<Nodes<ReviewNode>>,
    /// Null when the diff is too large for the API to enumerate.
    #[serde(default)]
    pub files: Option<Nodes<FileNode>>,
    #[serde(default)]
    pub timeline_items: Option<Nodes<ClosedEventNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReleaseAssetNode {
    pub id: String,
    pub name: String,
    pub download_count: i64,
    pub size: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReleaseNode {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub is_prerelease: bool,
    pub tag_name: String,
    #[serde(default)]
    pub release_assets: Option<Nodes<ReleaseAssetNode>>,
}

// ─── REST traffic payloads ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrafficTotals {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub uniques: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PathEntry {
    pub path: String,
    #[serde(default)]
    pub title: String,
    pub count: i64,
    pub uniques: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferrerEntry {
    pub referrer: String,
    pub count: i64,
    pub uniques: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForkEntry {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEntry {
    pub login: String,
}
