//! Canonical activity entities.
//!
//! These are the shapes that flow from the mapper to the store or to JSON
//! output. Remote field names never leak past this module.

mod convert;
mod types;

pub use convert::{IssueRows, MetricsRows, PullRequestRows, ReleaseRows};
pub use types::{
    ChangedFile, Comment, Issue, Metrics, PullRequest, Reaction, Release, ReleaseAsset, RepoRef,
    Review, TrafficPath, TrafficReferrer, TrafficSummary,
};
