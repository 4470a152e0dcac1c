//! Upsert semantics against a real SQLite schema.
//!
//! These tests require the `sqlite` and `migrate` features to be enabled
//! and use an in-memory SQLite database.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

mod common;

use common::{issue_node, minute, pull_request_node, repo, setup_test_db};
use repopulse::activity::{
    Issue, Metrics, PullRequest, Reaction, TrafficPath, TrafficReferrer, TrafficSummary,
};
use repopulse::entity::prelude::*;
use repopulse::mapper::{map_issue, map_pull_request};
use repopulse::persist::{Persist, load_watermark, persist_metrics, store_watermark};
use repopulse::sync::EntityKind;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityName, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Statement,
};

fn issue(number: i64, comments: usize) -> Issue {
    map_issue(issue_node(number, minute(number), comments, 100), &repo())
        .unwrap()
        .entity
}

fn pull_request(number: i64) -> PullRequest {
    map_pull_request(pull_request_node(number, minute(number)), &repo())
        .unwrap()
        .entity
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let db = setup_test_db().await;
    let issue = issue(1, 2);

    issue.persist(&db).await.unwrap();
    let first = IssueEntity::find_by_id("I_1".to_string()).one(&db).await.unwrap();
    let first_comments = IssueComment::find().all(&db).await.unwrap();

    issue.persist(&db).await.unwrap();
    let second = IssueEntity::find_by_id("I_1".to_string()).one(&db).await.unwrap();
    let second_comments = IssueComment::find().all(&db).await.unwrap();

    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 1);
    assert_eq!(first, second);
    assert_eq!(first_comments, second_comments);
    assert_eq!(IssueCommentReaction::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_upsert_merges_mutable_fields() {
    let db = setup_test_db().await;
    let mut issue = issue(3, 0);
    issue.persist(&db).await.unwrap();

    issue.title = "Renamed".to_string();
    issue.state = "CLOSED".to_string();
    issue.closed = true;
    issue.closed_by = Some("maintainer".to_string());
    issue.labels = vec!["wontfix".to_string()];
    issue.persist(&db).await.unwrap();

    let row = IssueEntity::find_by_id("I_3".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.title, "Renamed");
    assert!(row.closed);
    assert_eq!(row.closed_by.as_deref(), Some("maintainer"));
    assert_eq!(row.labels, serde_json::json!(["wontfix"]));
    assert_eq!(row.number, 3);
}

#[tokio::test]
async fn test_children_are_additive() {
    let db = setup_test_db().await;
    let mut issue = issue(5, 0);
    issue.reactions = vec![
        Reaction {
            reaction: "HEART".to_string(),
            count: 2,
        },
        Reaction {
            reaction: "ROCKET".to_string(),
            count: 1,
        },
    ];
    issue.persist(&db).await.unwrap();

    // The remote no longer reports ROCKET and HEART has grown.
    issue.reactions = vec![Reaction {
        reaction: "HEART".to_string(),
        count: 5,
    }];
    issue.persist(&db).await.unwrap();

    let rows = IssueReaction::find()
        .order_by_asc(IssueReactionColumn::Reaction)
        .all(&db)
        .await
        .unwrap();
    let snapshot: Vec<_> = rows.iter().map(|r| (r.reaction.as_str(), r.count)).collect();
    assert_eq!(snapshot, vec![("HEART", 5), ("ROCKET", 1)]);
}

#[tokio::test]
async fn test_failed_child_write_rolls_back_parent() {
    let db = setup_test_db().await;
    db.execute_unprepared("DROP TABLE github_issues_comments_reactions")
        .await
        .unwrap();

    let err = issue(9, 1).persist(&db).await.unwrap_err();
    assert!(err.to_string().contains("github_issues_comments_reactions"));

    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 0);
    assert_eq!(IssueReaction::find().count(&db).await.unwrap(), 0);
    assert_eq!(IssueComment::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_write_leaves_existing_parent_untouched() {
    let db = setup_test_db().await;
    let original = issue(11, 0);
    original.persist(&db).await.unwrap();

    db.execute_unprepared("DROP TABLE github_issues_comments_reactions")
        .await
        .unwrap();
    let mut edited = issue(11, 1);
    edited.title = "Edited".to_string();
    assert!(edited.persist(&db).await.is_err());

    let row = IssueEntity::find_by_id("I_11".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.title, "Issue 11");
}

#[tokio::test]
async fn test_pull_request_children_keyed_by_parent() {
    let db = setup_test_db().await;
    let mut pr = pull_request(4);
    pr.persist(&db).await.unwrap();

    pr.files[0].additions = 40;
    pr.persist(&db).await.unwrap();

    let files = PullRequestFile::find()
        .filter(PullRequestFileColumn::Pullrequest.eq("PR_4"))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].additions, 40);
    assert_eq!(PullRequestReview::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_watermark_storage_is_per_kind() {
    let db = setup_test_db().await;

    store_watermark(&db, &repo(), EntityKind::Issues, minute(10))
        .await
        .unwrap();
    store_watermark(&db, &repo(), EntityKind::PullRequests, minute(3))
        .await
        .unwrap();
    store_watermark(&db, &repo(), EntityKind::Issues, minute(12))
        .await
        .unwrap();

    let mark = load_watermark(&db, &repo()).await.unwrap();
    assert_eq!(mark.issues, Some(minute(12)));
    assert_eq!(mark.pull_requests, Some(minute(3)));
    assert_eq!(SyncWatermark::find().count(&db).await.unwrap(), 1);

    assert!(
        store_watermark(&db, &repo(), EntityKind::Releases, minute(1))
            .await
            .is_err()
    );
}

fn metrics(clones: i64, paths: &[(&str, i64)]) -> Metrics {
    Metrics {
        owner: "acme".to_string(),
        repository: "widgets".to_string(),
        forks: vec!["someone/widgets".to_string()],
        watches: vec!["a".to_string()],
        stars: vec!["a".to_string(), "b".to_string()],
        clones: TrafficSummary {
            count: clones,
            uniques: 1,
        },
        views: TrafficSummary {
            count: 100,
            uniques: 10,
        },
        paths: paths
            .iter()
            .map(|(path, count)| TrafficPath {
                path: path.to_string(),
                title: path.to_string(),
                count: *count,
                uniques: 1,
            })
            .collect(),
        referrers: vec![TrafficReferrer {
            referrer: "github.com".to_string(),
            count: 7,
            uniques: 3,
        }],
    }
}

#[tokio::test]
async fn test_metrics_overwrite_by_key() {
    let db = setup_test_db().await;

    persist_metrics(&db, &metrics(5, &[("/", 10), ("/issues", 4)]))
        .await
        .unwrap();
    persist_metrics(&db, &metrics(8, &[("/", 12)])).await.unwrap();

    assert_eq!(MetricsEntity::find().count(&db).await.unwrap(), 1);
    let clones = MetricsClones::find().all(&db).await.unwrap();
    assert_eq!(clones.len(), 1);
    assert_eq!(clones[0].count, 8);

    let paths = MetricsPath::find()
        .order_by_asc(MetricsPathColumn::Path)
        .all(&db)
        .await
        .unwrap();
    let snapshot: Vec<_> = paths.iter().map(|p| (p.path.as_str(), p.count)).collect();
    assert_eq!(snapshot, vec![("/", 12), ("/issues", 4)]);

    let root = MetricsEntity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(root.stars, serde_json::json!(["a", "b"]));
    assert_eq!(MetricsReferrer::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_migration_creates_every_entity_table() {
    let db = setup_test_db().await;

    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type = 'table'".to_string(),
        ))
        .await
        .unwrap();
    let tables: Vec<String> = rows
        .iter()
        .map(|row| row.try_get::<String>("", "name").unwrap())
        .collect();

    let expected = [
        SyncWatermark.table_name(),
        IssueEntity.table_name(),
        IssueReaction.table_name(),
        IssueComment.table_name(),
        IssueCommentReaction.table_name(),
        PullRequestEntity.table_name(),
        PullRequestReaction.table_name(),
        PullRequestReview.table_name(),
        PullRequestFile.table_name(),
        PullRequestComment.table_name(),
        PullRequestCommentReaction.table_name(),
        ReleaseEntity.table_name(),
        ReleaseAsset.table_name(),
        MetricsEntity.table_name(),
        MetricsClones.table_name(),
        MetricsViews.table_name(),
        MetricsPath.table_name(),
        MetricsReferrer.table_name(),
    ];
    for table in expected {
        assert!(table.starts_with("github_"), "unexpected table name {table}");
        assert!(tables.iter().any(|t| t == table), "missing table {table}");
    }
}

#[tokio::test]
async fn test_insert_through_entity_after_migration() {
    let db = setup_test_db().await;

    store_watermark(&db, &repo(), EntityKind::Issues, minute(3))
        .await
        .unwrap();
    issue(3, 1).persist(&db).await.unwrap();

    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 1);
    assert_eq!(IssueComment::find().count(&db).await.unwrap(), 1);
    assert_eq!(SyncWatermark::find().count(&db).await.unwrap(), 1);
}
