//! Common re-exports for convenient entity usage.

pub use super::issue::{
    ActiveModel as IssueActiveModel, Column as IssueColumn, Entity as IssueEntity,
    Model as IssueModel,
};
pub use super::issue_comment::{
    ActiveModel as IssueCommentActiveModel, Column as IssueCommentColumn,
    Entity as IssueComment, Model as IssueCommentModel,
};
pub use super::issue_comment_reaction::{
    ActiveModel as IssueCommentReactionActiveModel, Column as IssueCommentReactionColumn,
    Entity as IssueCommentReaction, Model as IssueCommentReactionModel,
};
pub use super::issue_reaction::{
    ActiveModel as IssueReactionActiveModel, Column as IssueReactionColumn,
    Entity as IssueReaction, Model as IssueReactionModel,
};
pub use super::metrics::{
    ActiveModel as MetricsActiveModel, Column as MetricsColumn, Entity as MetricsEntity,
    Model as MetricsModel,
};
pub use super::metrics_clones::{
    ActiveModel as MetricsClonesActiveModel, Column as MetricsClonesColumn,
    Entity as MetricsClones, Model as MetricsClonesModel,
};
pub use super::metrics_path::{
    ActiveModel as MetricsPathActiveModel, Column as MetricsPathColumn, Entity as MetricsPath,
    Model as MetricsPathModel,
};
pub use super::metrics_referrer::{
    ActiveModel as MetricsReferrerActiveModel, Column as MetricsReferrerColumn,
    Entity as MetricsReferrer, Model as MetricsReferrerModel,
};
pub use super::metrics_views::{
    ActiveModel as MetricsViewsActiveModel, Column as MetricsViewsColumn,
    Entity as MetricsViews, Model as MetricsViewsModel,
};
pub use super::pull_request::{
    ActiveModel as PullRequestActiveModel, Column as PullRequestColumn,
    Entity as PullRequestEntity, Model as PullRequestModel,
};
pub use super::pull_request_comment::{
    ActiveModel as PullRequestCommentActiveModel, Column as PullRequestCommentColumn,
    Entity as PullRequestComment, Model as PullRequestCommentModel,
};
pub use super::pull_request_comment_reaction::{
    ActiveModel as PullRequestCommentReactionActiveModel,
    Column as PullRequestCommentReactionColumn, Entity as PullRequestCommentReaction,
    Model as PullRequestCommentReactionModel,
};
pub use super::pull_request_file::{
    ActiveModel as PullRequestFileActiveModel, Column as PullRequestFileColumn,
    Entity as PullRequestFile, Model as PullRequestFileModel,
};
pub use super::pull_request_reaction::{
    ActiveModel as PullRequestReactionActiveModel, Column as PullRequestReactionColumn,
    Entity as PullRequestReaction, Model as PullRequestReactionModel,
};
pub use super::pull_request_review::{
    ActiveModel as PullRequestReviewActiveModel, Column as PullRequestReviewColumn,
    Entity as PullRequestReview, GHOST_AUTHOR, Model as PullRequestReviewModel,
};
pub use super::release::{
    ActiveModel as ReleaseActiveModel, Column as ReleaseColumn, Entity as ReleaseEntity,
    Model as ReleaseModel,
};
pub use super::release_asset::{
    ActiveModel as ReleaseAssetActiveModel, Column as ReleaseAssetColumn,
    Entity as ReleaseAsset, Model as ReleaseAssetModel,
};
pub use super::sync_watermark::{
    ActiveModel as SyncWatermarkActiveModel, Column as SyncWatermarkColumn,
    Entity as SyncWatermark, Model as SyncWatermarkModel,
};
