use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use super::{upsert, upsert_all};
use crate::activity::{Metrics, MetricsRows};
use crate::entity::prelude::*;

fn metrics_conflict() -> OnConflict {
    OnConflict::columns([MetricsColumn::Owner, MetricsColumn::Repository])
        .update_columns([
            MetricsColumn::Forks,
            MetricsColumn::Watches,
            MetricsColumn::Stars,
        ])
        .to_owned()
}

fn clones_conflict() -> OnConflict {
    OnConflict::columns([MetricsClonesColumn::Owner, MetricsClonesColumn::Repository])
        .update_columns([MetricsClonesColumn::Count, MetricsClonesColumn::Uniques])
        .to_owned()
}

fn views_conflict() -> OnConflict {
    OnConflict::columns([MetricsViewsColumn::Owner, MetricsViewsColumn::Repository])
        .update_columns([MetricsViewsColumn::Count, MetricsViewsColumn::Uniques])
        .to_owned()
}

fn path_conflict() -> OnConflict {
    OnConflict::columns([
        MetricsPathColumn::Owner,
        MetricsPathColumn::Repository,
        MetricsPathColumn::Path,
    ])
    .update_columns([
        MetricsPathColumn::Title,
        MetricsPathColumn::Count,
        MetricsPathColumn::Uniques,
    ])
    .to_owned()
}

fn referrer_conflict() -> OnConflict {
    OnConflict::columns([
        MetricsReferrerColumn::Owner,
        MetricsReferrerColumn::Repository,
        MetricsReferrerColumn::Referrer,
    ])
    .update_columns([MetricsReferrerColumn::Count, MetricsReferrerColumn::Uniques])
    .to_owned()
}

/// Write a metrics snapshot in one transaction.
///
/// The clone and view counters are overwritten wholesale; paths and
/// referrers are overwritten by key and never pruned.
pub async fn persist_metrics(db: &DatabaseConnection, metrics: &Metrics) -> Result<(), DbErr> {
    let MetricsRows {
        metrics: root,
        clones,
        views,
        paths,
        referrers,
    } = metrics.to_rows();

    let txn = db.begin().await?;
    upsert(&txn, root, &metrics_conflict()).await?;
    upsert(&txn, clones, &clones_conflict()).await?;
    upsert(&txn, views, &views_conflict()).await?;
    upsert_all(&txn, paths, &path_conflict()).await?;
    upsert_all(&txn, referrers, &referrer_conflict()).await?;
    txn.commit().await?;

    tracing::debug!(
        owner = %metrics.owner,
        repository = %metrics.repository,
        paths = metrics.paths.len(),
        referrers = metrics.referrers.len(),
        "Committed metrics"
    );
    Ok(())
}
