use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_pullrequests_comments_reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pullrequest: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub reaction: String,
    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_request_comment::Entity",
        from = "Column::Comment",
        to = "super::pull_request_comment::Column::Id"
    )]
    Comment,
}

impl Related<super::pull_request_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
