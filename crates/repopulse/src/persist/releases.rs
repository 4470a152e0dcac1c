use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use super::{Persist, upsert, upsert_all};
use crate::activity::{Release, ReleaseRows};
use crate::entity::prelude::*;

fn release_conflict() -> OnConflict {
    OnConflict::column(ReleaseColumn::Id)
        .update_columns([
            ReleaseColumn::Name,
            ReleaseColumn::Description,
            ReleaseColumn::Url,
            ReleaseColumn::CreatedAt,
            ReleaseColumn::IsPrerelease,
            ReleaseColumn::Tag,
        ])
        .to_owned()
}

/// Assets are immutable apart from their download counter.
fn asset_conflict() -> OnConflict {
    OnConflict::column(ReleaseAssetColumn::Id)
        .update_column(ReleaseAssetColumn::Downloads)
        .to_owned()
}

pub(crate) async fn write_release<C: ConnectionTrait>(
    conn: &C,
    rows: ReleaseRows,
) -> Result<(), DbErr> {
    upsert(conn, rows.release, &release_conflict()).await?;
    upsert_all(conn, rows.assets, &asset_conflict()).await?;
    Ok(())
}

#[async_trait]
impl Persist for Release {
    async fn persist(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;
        write_release(&txn, self.to_rows()).await?;
        txn.commit().await?;
        tracing::debug!(id = %self.id, tag = %self.tag, "Committed release");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::{PostgresQueryBuilder, Query};

    use super::*;

    #[test]
    fn test_asset_conflict_refreshes_downloads_only() {
        let sql = Query::insert()
            .into_table(ReleaseAsset)
            .columns([
                ReleaseAssetColumn::Id,
                ReleaseAssetColumn::Name,
                ReleaseAssetColumn::Downloads,
            ])
            .values_panic(["RA_1".into(), "app.tar.gz".into(), 10.into()])
            .on_conflict(asset_conflict())
            .to_string(PostgresQueryBuilder);

        assert!(sql.ends_with(r#"ON CONFLICT ("id") DO UPDATE SET "downloads" = "excluded"."downloads""#));
    }
}
