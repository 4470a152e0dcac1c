//! Conversions from canonical entities to row models.
//!
//! Every child row gets its parent key set explicitly here, so the persist
//! layer never has to thread ids around.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::types::{Comment, Issue, Metrics, PullRequest, Reaction, Release};
use crate::entity::prelude::*;

#[inline]
fn ts(t: DateTime<Utc>) -> DateTimeWithTimeZone {
    t.fixed_offset()
}

#[inline]
fn ts_opt(t: Option<DateTime<Utc>>) -> Option<DateTimeWithTimeZone> {
    t.map(|t| t.fixed_offset())
}

fn string_array(values: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        values
            .iter()
            .cloned()
            .map(serde_json::Value::String)
            .collect(),
    )
}

/// Rows for one issue, parent first.
#[derive(Debug, Clone)]
pub struct IssueRows {
    pub issue: IssueActiveModel,
    pub reactions: Vec<IssueReactionActiveModel>,
    pub comments: Vec<IssueCommentActiveModel>,
    pub comment_reactions: Vec<IssueCommentReactionActiveModel>,
}

/// Rows for one pull request, parent first.
#[derive(Debug, Clone)]
pub struct PullRequestRows {
    pub pull_request: PullRequestActiveModel,
    pub reactions: Vec<PullRequestReactionActiveModel>,
    pub reviews: Vec<PullRequestReviewActiveModel>,
    pub files: Vec<PullRequestFileActiveModel>,
    pub comments: Vec<PullRequestCommentActiveModel>,
    pub comment_reactions: Vec<PullRequestCommentReactionActiveModel>,
}

/// Rows for one release, parent first.
#[derive(Debug, Clone)]
pub struct ReleaseRows {
    pub release: ReleaseActiveModel,
    pub assets: Vec<ReleaseAssetActiveModel>,
}

/// Rows for one metrics snapshot, parent first.
#[derive(Debug, Clone)]
pub struct MetricsRows {
    pub metrics: MetricsActiveModel,
    pub clones: MetricsClonesActiveModel,
    pub views: MetricsViewsActiveModel,
    pub paths: Vec<MetricsPathActiveModel>,
    pub referrers: Vec<MetricsReferrerActiveModel>,
}

impl Issue {
    /// Flatten this issue into its parent and child rows.
    pub fn to_rows(&self) -> IssueRows {
        let issue = IssueActiveModel {
            id: Set(self.id.clone()),
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            number: Set(self.number),
            title: Set(self.title.clone()),
            body: Set(self.body.clone()),
            author: Set(self.author.clone()),
            author_association: Set(self.author_association.clone()),
            labels: Set(string_array(&self.labels)),
            created_at: Set(ts(self.created_at)),
            published_at: Set(ts_opt(self.published_at)),
            updated_at: Set(ts(self.updated_at)),
            last_edited_at: Set(ts_opt(self.last_edited_at)),
            closed_at: Set(ts_opt(self.closed_at)),
            state: Set(self.state.clone()),
            locked: Set(self.locked),
            closed: Set(self.closed),
            closed_by: Set(self.closed_by.clone()),
        };

        let reactions = self
            .reactions
            .iter()
            .map(|r| IssueReactionActiveModel {
                issue: Set(self.id.clone()),
                reaction: Set(r.reaction.clone()),
                count: Set(r.count),
            })
            .collect();

        let mut comments = Vec::with_capacity(self.comments.len());
        let mut comment_reactions = Vec::new();
        for comment in &self.comments {
            comments.push(IssueCommentActiveModel {
                id: Set(comment.id.clone()),
                issue: Set(self.id.clone()),
                author: Set(comment.author.clone()),
                author_association: Set(comment.author_association.clone()),
                body: Set(comment.body.clone()),
                created_at: Set(ts(comment.created_at)),
                published_at: Set(ts_opt(comment.published_at)),
                updated_at: Set(ts(comment.updated_at)),
                last_edited_at: Set(ts_opt(comment.last_edited_at)),
            });
            comment_reactions.extend(comment.reactions.iter().map(|r| {
                IssueCommentReactionActiveModel {
                    issue: Set(self.id.clone()),
                    comment: Set(comment.id.clone()),
                    reaction: Set(r.reaction.clone()),
                    count: Set(r.count),
                }
            }));
        }

        IssueRows {
            issue,
            reactions,
            comments,
            comment_reactions,
        }
    }
}

fn pull_request_comment(pull_request: &str, comment: &Comment) -> PullRequestCommentActiveModel {
    PullRequestCommentActiveModel {
        id: Set(comment.id.clone()),
        pullrequest: Set(pull_request.to_owned()),
        author: Set(comment.author.clone()),
        author_association: Set(comment.author_association.clone()),
        body: Set(comment.body.clone()),
        created_at: Set(ts(comment.created_at)),
        published_at: Set(ts_opt(comment.published_at)),
        updated_at: Set(ts(comment.updated_at)),
        last_edited_at: Set(ts_opt(comment.last_edited_at)),
    }
}

fn pull_request_comment_reaction(
    pull_request: &str,
    comment: &str,
    reaction: &Reaction,
) -> PullRequestCommentReactionActiveModel {
    PullRequestCommentReactionActiveModel {
        pullrequest: Set(pull_request.to_owned()),
        comment: Set(comment.to_owned()),
        reaction: Set(reaction.reaction.clone()),
        count: Set(reaction.count),
    }
}

impl PullRequest {
    /// Flatten this pull request into its parent and child rows.
    pub fn to_rows(&self) -> PullRequestRows {
        let pull_request = PullRequestActiveModel {
            id: Set(self.id.clone()),
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            number: Set(self.number),
            title: Set(self.title.clone()),
            body: Set(self.body.clone()),
            author: Set(self.author.clone()),
            author_association: Set(self.author_association.clone()),
            labels: Set(string_array(&self.labels)),
            created_at: Set(ts(self.created_at)),
            published_at: Set(ts_opt(self.published_at)),
            updated_at: Set(ts(self.updated_at)),
            last_edited_at: Set(ts_opt(self.last_edited_at)),
            closed_at: Set(ts_opt(self.closed_at)),
            merged_at: Set(ts_opt(self.merged_at)),
            state: Set(self.state.clone()),
            locked: Set(self.locked),
            closed: Set(self.closed),
            closed_by: Set(self.closed_by.clone()),
            merged: Set(self.merged),
            merged_by: Set(self.merged_by.clone()),
            mergeable: Set(self.mergeable.clone()),
            review_decision: Set(self.review_decision.clone()),
            additions: Set(self.additions),
            deletions: Set(self.deletions),
            changed_files: Set(self.changed_files),
            base_ref_name: Set(self.base_ref_name.clone()),
            head_ref_name: Set(self.head_ref_name.clone()),
        };

        let reactions = self
            .reactions
            .iter()
            .map(|r| PullRequestReactionActiveModel {
                pullrequest: Set(self.id.clone()),
                reaction: Set(r.reaction.clone()),
                count: Set(r.count),
            })
            .collect();

        let reviews = self
            .reviews
            .iter()
            .map(|r| PullRequestReviewActiveModel {
                pullrequest: Set(self.id.clone()),
                author: Set(r.author.clone().unwrap_or_else(|| GHOST_AUTHOR.to_owned())),
                author_association: Set(r.author_association.clone()),
                body: Set(r.body.clone()),
                state: Set(r.state.clone()),
                created_at: Set(ts(r.created_at)),
                published_at: Set(ts_opt(r.published_at)),
                last_edited_at: Set(ts_opt(r.last_edited_at)),
                updated_at: Set(ts(r.updated_at)),
                submitted_at: Set(ts_opt(r.submitted_at)),
            })
            .collect();

        let files = self
            .files
            .iter()
            .map(|f| PullRequestFileActiveModel {
                pullrequest: Set(self.id.clone()),
                path: Set(f.path.clone()),
                additions: Set(f.additions),
                deletions: Set(f.deletions),
            })
            .collect();

        let comments = self
            .comments
            .iter()
            .map(|c| pull_request_comment(&self.id, c))
            .collect();

        let comment_reactions = self
            .comments
            .iter()
            .flat_map(|c| {
                c.reactions
                    .iter()
                    .map(|r| pull_request_comment_reaction(&self.id, &c.id, r))
            })
            .collect();

        PullRequestRows {
            pull_request,
            reactions,
            reviews,
            files,
            comments,
            comment_reactions,
        }
    }
}

impl Release {
    /// Flatten this release into its parent and asset rows.
    pub fn to_rows(&self) -> ReleaseRows {
        let release = ReleaseActiveModel {
            id: Set(self.id.clone()),
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            name: Set(self.name.clone()),
            description: Set(self.description.clone()),
            url: Set(self.url.clone()),
            created_at: Set(ts(self.created_at)),
            is_prerelease: Set(self.is_prerelease),
            tag: Set(self.tag.clone()),
        };

        let assets = self
            .assets
            .iter()
            .map(|a| ReleaseAssetActiveModel {
                id: Set(a.id.clone()),
                release: Set(self.id.clone()),
                owner: Set(self.owner.clone()),
                repository: Set(self.repository.clone()),
                name: Set(a.name.clone()),
                downloads: Set(a.downloads),
                size: Set(a.size),
            })
            .collect();

        ReleaseRows { release, assets }
    }
}

impl Metrics {
    /// Flatten this snapshot into its summary and traffic rows.
    pub fn to_rows(&self) -> MetricsRows {
        let metrics = MetricsActiveModel {
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            forks: Set(string_array(&self.forks)),
            watches: Set(string_array(&self.watches)),
            stars: Set(string_array(&self.stars)),
        };
        let clones = MetricsClonesActiveModel {
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            count: Set(self.clones.count),
            uniques: Set(self.clones.uniques),
        };
        let views = MetricsViewsActiveModel {
            owner: Set(self.owner.clone()),
            repository: Set(self.repository.clone()),
            count: Set(self.views.count),
            uniques: Set(self.views.uniques),
        };
        let paths = self
            .paths
            .iter()
            .map(|p| MetricsPathActiveModel {
                owner: Set(self.owner.clone()),
                repository: Set(self.repository.clone()),
                path: Set(p.path.clone()),
                title: Set(p.title.clone()),
                count: Set(p.count),
                uniques: Set(p.uniques),
            })
            .collect();
        let referrers = self
            .referrers
            .iter()
            .map(|r| MetricsReferrerActiveModel {
                owner: Set(self.owner.clone()),
                repository: Set(self.repository.clone()),
                referrer: Set(r.referrer.clone()),
                count: Set(r.count),
                uniques: Set(r.uniques),
            })
            .collect();

        MetricsRows {
            metrics,
            clones,
            views,
            paths,
            referrers,
        }
    }
}
