//! Pull request review entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Login stored for reviews whose author account no longer exists.
pub const GHOST_AUTHOR: &str = "ghost";

/// Latest review per (pull request, author).
///
/// A later review by the same author overwrites the earlier one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_pullrequests_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pullrequest: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub author: String,
    pub author_association: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub state: String,
    pub created_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub last_edited_at: Option<DateTimeWithTimeZone>,
    pub updated_at: DateTimeWithTimeZone,
    pub submitted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_request::Entity",
        from = "Column::Pullrequest",
        to = "super::pull_request::Column::Id"
    )]
    PullRequest,
}

impl Related<super::pull_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PullRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
