//! Entity Mapper: raw API nodes to canonical domain entities.
//!
//! Mapping is pure. A node that does not match its schema fails with a
//! [`MappingError`] naming the kind; there is no partial entity.

mod schema;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use self::schema::{
    ClosedEventNode, CommentConnection, CommentNode, FileNode, ForkEntry, IssueNode, LabelNode,
    Nodes, PathEntry, PullRequestNode, ReactionGroupNode, ReferrerEntry, ReleaseAssetNode,
    ReleaseNode, ReviewNode, TrafficTotals, UserEntry,
};
use crate::activity::{
    ChangedFile, Comment, Issue, Metrics, PullRequest, Reaction, Release, ReleaseAsset, RepoRef,
    Review, TrafficPath, TrafficReferrer, TrafficSummary,
};
use crate::error::{MappedKind, MappingError};
use crate::sync::{CommentCursor, EntityKind, Mapped, Paginated, RawMetrics};

type MapResult<T> = Result<T, MappingError>;

fn decode<T: DeserializeOwned>(kind: impl Into<MappedKind>, value: Value) -> MapResult<T> {
    serde_json::from_value(value).map_err(|e| MappingError::new(kind, e.to_string()))
}

fn reactions(groups: Option<Vec<ReactionGroupNode>>) -> Vec<Reaction> {
    groups
        .unwrap_or_default()
        .into_iter()
        .map(|g| Reaction {
            reaction: g.content,
            count: g.users.total_count,
        })
        .collect()
}

fn labels(connection: Option<Nodes<LabelNode>>) -> Vec<String> {
    Nodes::flatten(connection).into_iter().map(|l| l.name).collect()
}

/// Actor of the most recent close event, if any.
fn closed_by(timeline: Option<Nodes<ClosedEventNode>>) -> Option<String> {
    Nodes::flatten(timeline)
        .into_iter()
        .last()
        .and_then(|event| event.actor)
        .map(|actor| actor.login)
}

fn comment(node: CommentNode) -> Comment {
    Comment {
        id: node.id,
        author: node.author.map(|a| a.login),
        author_association: node.author_association,
        body: node.body,
        created_at: node.created_at,
        published_at: node.published_at,
        updated_at: node.updated_at,
        last_edited_at: node.last_edited_at,
        reactions: reactions(node.reaction_groups),
    }
}

/// Split an embedded comment slice into mapped comments and a continuation.
fn embedded_comments(
    kind: EntityKind,
    number: i64,
    connection: CommentConnection,
) -> MapResult<(Vec<Comment>, Option<CommentCursor>)> {
    let comments = connection.nodes.into_iter().map(comment).collect();
    let more = if connection.page_info.has_next_page {
        let after = connection.page_info.end_cursor.ok_or_else(|| {
            MappingError::new(kind, format!("#{number}: comments hasNextPage without endCursor"))
        })?;
        Some(CommentCursor { number, after })
    } else {
        None
    };
    Ok((comments, more))
}

/// Map comment nodes from a continuation page.
pub fn map_comments(nodes: Vec<Value>) -> MapResult<Vec<Comment>> {
    nodes
        .into_iter()
        .map(|node| decode::<CommentNode>(MappedKind::Comment, node).map(comment))
        .collect()
}

/// Map one issue node.
pub fn map_issue(node: Value, repo: &RepoRef) -> MapResult<Mapped<Issue>> {
    let n: IssueNode = decode(EntityKind::Issues, node)?;
    let (comments, more_comments) = embedded_comments(EntityKind::Issues, n.number, n.comments)?;

    let entity = Issue {
        id: n.id,
        number: n.number,
        owner: repo.owner.clone(),
        repository: repo.name.clone(),
        author: n.author.map(|a| a.login),
        author_association: n.author_association,
        title: n.title,
        body: n.body,
        created_at: n.created_at,
        published_at: n.published_at,
        updated_at: n.updated_at,
        last_edited_at: n.last_edited_at,
        state: n.state,
        locked: n.locked,
        closed: n.closed,
        closed_at: n.closed_at,
        closed_by: closed_by(n.timeline_items),
        labels: labels(n.labels),
        comments,
        reactions: reactions(n.reaction_groups),
    };
    Ok(Mapped {
        entity,
        more_comments,
    })
}

fn review(node: ReviewNode) -> Review {
    Review {
        author: node.author.map(|a| a.login),
        author_association: node.author_association,
        body: node.body,
        state: node.state,
        created_at: node.created_at,
        published_at: node.published_at,
        last_edited_at: node.last_edited_at,
        updated_at: node.updated_at,
        submitted_at: node.submitted_at,
    }
}

fn file(node: FileNode) -> ChangedFile {
    ChangedFile {
        path: node.path,
        additions: node.additions,
        deletions: node.deletions,
    }
}

/// Map one pull request node.
///
/// Reviews and files are mapped once here, independent of how many comment
/// pages the pull request has.
pub fn map_pull_request(node: Value, repo: &RepoRef) -> MapResult<Mapped<PullRequest>> {
    let n: PullRequestNode = decode(EntityKind::PullRequests, node)?;
    let (comments, more_comments) =
        embedded_comments(EntityKind::PullRequests, n.number, n.comments)?;

    let entity = PullRequest {
        id: n.id,
        number: n.number,
        owner: repo.owner.clone(),
        repository: repo.name.clone(),
        author: n.author.map(|a| a.login),
        author_association: n.author_association,
        title: n.title,
        body: n.body,
        created_at: n.created_at,
        published_at: n.published_at,
        updated_at: n.updated_at,
        last_edited_at: n.last_edited_at,
        state: n.state,
        locked: n.locked,
        closed: n.closed,
        closed_at: n.closed_at,
        closed_by: closed_by(n.timeline_items),
        merged: n.merged,
        merged_at: n.merged_at,
        merged_by: n.merged_by.map(|a| a.login),
        mergeable: n.mergeable,
        review_decision: n.review_decision,
        additions: n.additions,
        deletions: n.deletions,
        changed_files: n.changed_files,
        base_ref_name: n.base_ref_name,
        head_ref_name: n.head_ref_name,
        labels: labels(n.labels),
        comments,
        reactions: reactions(n.reaction_groups),
        reviews: Nodes::flatten(n.reviews).into_iter().map(review).collect(),
        files: Nodes::flatten(n.files).into_iter().map(file).collect(),
    };
    Ok(Mapped {
        entity,
        more_comments,
    })
}

/// Map one release node.
pub fn map_release(node: Value, repo: &RepoRef) -> MapResult<Mapped<Release>> {
    let n: ReleaseNode = decode(EntityKind::Releases, node)?;
    let assets = Nodes::flatten(n.release_assets)
        .into_iter()
        .map(|a: ReleaseAssetNode| ReleaseAsset {
            id: a.id,
            release: n.id.clone(),
            name: a.name,
            downloads: a.download_count,
            size: a.size,
        })
        .collect();

    Ok(Mapped::complete(Release {
        id: n.id,
        owner: repo.owner.clone(),
        repository: repo.name.clone(),
        name: n.name,
        description: n.description,
        url: n.url,
        created_at: n.created_at,
        is_prerelease: n.is_prerelease,
        tag: n.tag_name,
        assets,
    }))
}

/// Map the REST traffic and audience payloads into one snapshot.
pub fn map_metrics(repo: &RepoRef, raw: RawMetrics) -> MapResult<Metrics> {
    let clones: TrafficTotals = decode(MappedKind::Metrics, raw.clones)?;
    let views: TrafficTotals = decode(MappedKind::Metrics, raw.views)?;
    let paths: Vec<PathEntry> = decode(MappedKind::Metrics, raw.paths)?;
    let referrers: Vec<ReferrerEntry> = decode(MappedKind::Metrics, raw.referrers)?;
    let forks: Vec<ForkEntry> = decode(MappedKind::Metrics, raw.forks)?;
    let stars: Vec<UserEntry> = decode(MappedKind::Metrics, raw.stargazers)?;
    let watches: Vec<UserEntry> = decode(MappedKind::Metrics, raw.watchers)?;

    Ok(Metrics {
        owner: repo.owner.clone(),
        repository: repo.name.clone(),
        forks: forks.into_iter().map(|f| f.full_name).collect(),
        watches: watches.into_iter().map(|u| u.login).collect(),
        stars: stars.into_iter().map(|u| u.login).collect(),
        clones: TrafficSummary {
            count: clones.count,
            uniques: clones.uniques,
        },
        views: TrafficSummary {
            count: views.count,
            uniques: views.uniques,
        },
        paths: paths
            .into_iter()
            .map(|p| TrafficPath {
                path: p.path,
                title: p.title,
                count: p.count,
                uniques: p.uniques,
            })
            .collect(),
        referrers: referrers
            .into_iter()
            .map(|r| TrafficReferrer {
                referrer: r.referrer,
                count: r.count,
                uniques: r.uniques,
            })
            .collect(),
    })
}

// ─── Pagination bindings ─────────────────────────────────────────────────────

impl Paginated for Issue {
    const KIND: EntityKind = EntityKind::Issues;

    fn from_node(node: Value, repo: &RepoRef) -> MapResult<Mapped<Self>> {
        map_issue(node, repo)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn extend_comments(&mut self, nodes: Vec<Value>) -> MapResult<()> {
        self.comments.extend(map_comments(nodes)?);
        Ok(())
    }
}

impl Paginated for PullRequest {
    const KIND: EntityKind = EntityKind::PullRequests;

    fn from_node(node: Value, repo: &RepoRef) -> MapResult<Mapped<Self>> {
        map_pull_request(node, repo)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn extend_comments(&mut self, nodes: Vec<Value>) -> MapResult<()> {
        self.comments.extend(map_comments(nodes)?);
        Ok(())
    }
}

impl Paginated for Release {
    const KIND: EntityKind = EntityKind::Releases;

    fn from_node(node: Value, repo: &RepoRef) -> MapResult<Mapped<Self>> {
        map_release(node, repo)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn id(&self) -> &str {
        &self.id
    }
}
