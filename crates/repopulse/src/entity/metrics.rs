//! Repository audience snapshot.
//!
//! The traffic tables (`metrics_clones`, `metrics_views`, `metrics_path`,
//! `metrics_referrer`) hang off this row by (owner, repository).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub repository: String,
    /// Fork full names as a JSON array.
    #[sea_orm(column_type = "Json")]
    pub forks: serde_json::Value,
    /// Watcher logins as a JSON array.
    #[sea_orm(column_type = "Json")]
    pub watches: serde_json::Value,
    /// Stargazer logins as a JSON array.
    #[sea_orm(column_type = "Json")]
    pub stars: serde_json::Value,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
