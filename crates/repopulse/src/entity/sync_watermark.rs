//! Per-repository resumption state for incremental syncs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per repository. Both marks only ever move forward.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_metadata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub repository: String,
    /// Highest `updated_at` among persisted issues.
    pub issues_updated_at: Option<DateTimeWithTimeZone>,
    /// Highest `updated_at` among persisted pull requests.
    pub pullrequests_updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
