//! Pull request entity - top-level aggregate for pull requests.
//!
//! Shares the issue columns and adds merge, review and diff state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_pullrequests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    // ─── Identity ────────────────────────────────────────────────────────────
    pub owner: String,
    pub repository: String,
    pub number: i64,

    // ─── Content ─────────────────────────────────────────────────────────────
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author: Option<String>,
    pub author_association: String,
    #[sea_orm(column_type = "Json")]
    pub labels: serde_json::Value,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub created_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub updated_at: DateTimeWithTimeZone,
    pub last_edited_at: Option<DateTimeWithTimeZone>,
    pub closed_at: Option<DateTimeWithTimeZone>,
    pub merged_at: Option<DateTimeWithTimeZone>,

    // ─── State ───────────────────────────────────────────────────────────────
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub closed_by: Option<String>,
    pub merged: bool,
    pub merged_by: Option<String>,
    pub mergeable: String,
    pub review_decision: Option<String>,

    // ─── Diff ────────────────────────────────────────────────────────────────
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub base_ref_name: String,
    pub head_ref_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pull_request_reaction::Entity")]
    Reactions,
    #[sea_orm(has_many = "super::pull_request_review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::pull_request_file::Entity")]
    Files,
    #[sea_orm(has_many = "super::pull_request_comment::Entity")]
    Comments,
}

impl Related<super::pull_request_reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reactions.def()
    }
}

impl Related<super::pull_request_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::pull_request_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl Related<super::pull_request_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
