use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-file diff stats, keyed by (pull request, path).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_pullrequests_files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pullrequest: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub path: String,
    pub additions: i64,
    pub deletions: i64,
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
