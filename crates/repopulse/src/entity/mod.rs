//! SeaORM entity definitions for the activity database schema.
//!
//! Table names are stable: existing databases populated by earlier
//! tooling keep working against this schema.

pub mod issue;
pub mod issue_comment;
pub mod issue_comment_reaction;
pub mod issue_reaction;
pub mod metrics;
pub mod metrics_clones;
pub mod metrics_path;
pub mod metrics_referrer;
pub mod metrics_views;
pub mod prelude;
pub mod pull_request;
pub mod pull_request_comment;
pub mod pull_request_comment_reaction;
pub mod pull_request_file;
pub mod pull_request_reaction;
pub mod pull_request_review;
pub mod release;
pub mod release_asset;
pub mod sync_watermark;
