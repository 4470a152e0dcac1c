//! Idempotent persistence of entity trees.
//!
//! Each top-level entity is written in its own transaction, parent first,
//! then every child collection. Rows are upserted with
//! `INSERT ... ON CONFLICT (key) DO UPDATE`; key columns are never updated
//! and children missing from a payload are never deleted. Dropping a
//! transaction before commit rolls the whole entity back.

mod issues;
mod metrics;
mod pull_requests;
mod releases;
mod watermark;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
};

pub use metrics::persist_metrics;
pub use watermark::{load_watermark, store_watermark};

/// A top-level entity that can be written with its children.
#[async_trait]
pub trait Persist: Sync {
    /// Upsert this entity and its child rows in one transaction.
    async fn persist(&self, db: &DatabaseConnection) -> Result<(), DbErr>;
}

/// Upsert one row.
///
/// Rows are written one statement at a time: a payload may carry the same
/// child key twice (several reviews by one author), and a single multi-row
/// statement cannot update the same row twice on every backend.
pub(crate) async fn upsert<A, C>(conn: &C, model: A, on_conflict: &OnConflict) -> Result<(), DbErr>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    <A::Entity as EntityTrait>::insert(model)
        .on_conflict(on_conflict.clone())
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Upsert a child collection in order.
pub(crate) async fn upsert_all<A, C>(
    conn: &C,
    models: Vec<A>,
    on_conflict: &OnConflict,
) -> Result<(), DbErr>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    for model in models {
        upsert(conn, model, on_conflict).await?;
    }
    Ok(())
}
