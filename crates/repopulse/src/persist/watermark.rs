use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use super::upsert;
use crate::activity::RepoRef;
use crate::entity::prelude::*;
use crate::sync::{EntityKind, Watermark};

/// Read the stored marks for a repository; both are unset if no row exists.
pub async fn load_watermark<C: ConnectionTrait>(
    db: &C,
    repo: &RepoRef,
) -> Result<Watermark, DbErr> {
    let row = SyncWatermark::find_by_id((repo.owner.clone(), repo.name.clone()))
        .one(db)
        .await?;

    Ok(row
        .map(|m| Watermark {
            issues: m.issues_updated_at.map(|t| t.with_timezone(&Utc)),
            pull_requests: m.pullrequests_updated_at.map(|t| t.with_timezone(&Utc)),
        })
        .unwrap_or_default())
}

/// Store the mark for one entity kind, leaving the other kind's mark as is.
pub async fn store_watermark<C: ConnectionTrait>(
    db: &C,
    repo: &RepoRef,
    kind: EntityKind,
    at: DateTime<Utc>,
) -> Result<(), DbErr> {
    let mut model = SyncWatermarkActiveModel {
        owner: Set(repo.owner.clone()),
        repository: Set(repo.name.clone()),
        ..Default::default()
    };

    let column = match kind {
        EntityKind::Issues => {
            model.issues_updated_at = Set(Some(at.fixed_offset()));
            SyncWatermarkColumn::IssuesUpdatedAt
        }
        EntityKind::PullRequests => {
            model.pullrequests_updated_at = Set(Some(at.fixed_offset()));
            SyncWatermarkColumn::PullrequestsUpdatedAt
        }
        EntityKind::Releases => {
            return Err(DbErr::Custom(format!("no watermark is stored for {kind}")));
        }
    };

    let on_conflict = OnConflict::columns([
        SyncWatermarkColumn::Owner,
        SyncWatermarkColumn::Repository,
    ])
    .update_column(column)
    .to_owned();

    upsert(db, model, &on_conflict).await
}
