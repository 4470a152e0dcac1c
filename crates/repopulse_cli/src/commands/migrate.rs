use repopulse::db;
use repopulse::migration::{Migrator, MigratorTrait};

use crate::MigrateAction;
use crate::commands::database::prepare_sqlite_path;

pub(crate) async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    prepare_sqlite_path(database_url)?;
    let db = db::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            println!("Applying migrations...");
            Migrator::up(&db, None).await?;
            println!("Migrations applied successfully.");
        }
        MigrateAction::Down => {
            println!("Rolling back last migration...");
            Migrator::down(&db, Some(1)).await?;
            println!("Rollback complete.");
        }
        MigrateAction::Status => {
            println!("Migration status:");
            Migrator::status(&db).await?;
        }
        MigrateAction::Fresh => {
            println!("Dropping all tables and reapplying migrations...");
            Migrator::fresh(&db).await?;
            println!("Fresh migration complete.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repopulse::entity::prelude::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_migrate_up_on_in_memory_database() {
        // Each in-memory connection is its own database, so only check the
        // command completes.
        handle_migrate(MigrateAction::Up, "sqlite::memory:")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fresh_schema_is_queryable() {
        let db = repopulse::connect("sqlite::memory:").await.unwrap();
        Migrator::fresh(&db).await.unwrap();
        let rows = IssueEntity::find().all(&db).await.unwrap();
        assert!(rows.is_empty());
    }
}
