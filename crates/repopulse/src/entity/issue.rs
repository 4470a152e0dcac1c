//! Issue entity - top-level aggregate for repository issues.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_issues")]
pub struct Model {
    /// GraphQL node id.
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
    /// Label names, stored as a JSON array.
    #[sea_orm(column_type = "Json")]
    pub labels: serde_json::Value,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub created_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub updated_at: DateTimeWithTimeZone,
    pub last_edited_at: Option<DateTimeWithTimeZone>,
    pub closed_at: Option<DateTimeWithTimeZone>,

    // ─── State ───────────────────────────────────────────────────────────────
    pub state: String,
    pub locked: bool,
    pub closed: bool,
    pub closed_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issue_reaction::Entity")]
    Reactions,
    #[sea_orm(has_many = "super::issue_comment::Entity")]
    Comments,
}

impl Related<super::issue_reaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reactions.def()
    }
}

impl Related<super::issue_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
