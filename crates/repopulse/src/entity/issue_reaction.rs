use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reaction count on an issue, keyed by (issue, reaction).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_issues_reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub issue: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub reaction: String,
    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::issue::Entity",
        from = "Column::Issue",
        to = "super::issue::Column::Id"
    )]
    Issue,
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
