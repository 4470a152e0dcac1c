//! End-to-end sync tests against an in-memory SQLite store.
//!
//! These tests require the `sqlite` and `migrate` features to be enabled.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

mod common;

use common::{FakeGitHub, minute, pull_request_node, release_node, repo, setup_test_db};
use repopulse::SyncError;
use repopulse::entity::prelude::*;
use repopulse::persist::load_watermark;
use repopulse::sync::{
    Sink, StopReason, SyncRequest, sync_issues, sync_pull_requests, sync_releases,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn test_issue_sync_end_to_end_with_incremental_rerun() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    for number in 1..=120 {
        // Issue 7 has comments beyond its embedded slice.
        let (comments, embedded) = if number == 7 { (130, 100) } else { (1, 100) };
        github.add_issue(number, minute(number), comments, embedded);
    }

    let epoch = chrono::DateTime::UNIX_EPOCH;
    let request = SyncRequest::new(repo()).with_since(Some(epoch));
    let outcome = sync_issues(&github, &request, Sink::Persist(&db), None)
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 120);
    assert_eq!(outcome.report.pages, 3);
    assert_eq!(outcome.report.stop, StopReason::LastPage);
    assert_eq!(outcome.report.persisted, 120);
    assert_eq!(outcome.report.watermark, Some(minute(120)));

    let page_sizes: Vec<u32> = github.requests.lock().unwrap().iter().map(|r| r.first).collect();
    assert_eq!(page_sizes, vec![50, 50, 50]);
    assert!(github.requests.lock().unwrap().iter().all(|r| r.since == Some(epoch)));

    let seventh = outcome.items.iter().find(|i| i.number == 7).unwrap();
    assert_eq!(seventh.comments.len(), 130);
    assert_eq!(seventh.labels, vec!["bug", "area-1"]);
    assert_eq!(github.comment_requests.lock().unwrap().len(), 1);

    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 120);
    assert_eq!(IssueComment::find().count(&db).await.unwrap(), 119 + 130);
    assert_eq!(IssueReaction::find().count(&db).await.unwrap(), 120);

    let stored = load_watermark(&db, &repo()).await.unwrap();
    assert_eq!(stored.issues, Some(minute(120)));
    assert_eq!(stored.pull_requests, None);

    // Issue 42 is edited remotely; the rerun resumes from the stored mark.
    github.add_issue(42, minute(500), 1, 100);
    let calls_before = github.page_calls();

    let rerun = sync_issues(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();

    assert_eq!(rerun.report.since, Some(minute(120)));
    assert_eq!(github.page_calls(), calls_before + 1);
    // The remote filter is inclusive, so the entity at the mark itself is replayed.
    let numbers: Vec<_> = rerun.items.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![120, 42]);
    assert_eq!(rerun.report.watermark, Some(minute(500)));
    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 120);

    let row = IssueEntity::find_by_id("I_42".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.updated_at, minute(500));
}

#[tokio::test]
async fn test_issue_sync_stops_at_first_persistence_failure() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    // Only issue 3 carries a comment, and with it a comment reaction row.
    for number in 1..=5 {
        let comments = if number == 3 { 1 } else { 0 };
        github.add_issue(number, minute(number), comments, 100);
    }
    db.execute_unprepared("DROP TABLE github_issues_comments_reactions")
        .await
        .unwrap();

    let epoch = chrono::DateTime::UNIX_EPOCH;
    let request = SyncRequest::new(repo()).with_since(Some(epoch));
    let err = sync_issues(&github, &request, Sink::Persist(&db), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Persistence(_)), "got {err:?}");
    let stored: Vec<i64> = IssueEntity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.number)
        .collect();
    assert_eq!(stored.len(), 2);
    assert!(stored.contains(&1) && stored.contains(&2));
    assert_eq!(IssueComment::find().count(&db).await.unwrap(), 0);

    let watermark = load_watermark(&db, &repo()).await.unwrap();
    assert_eq!(watermark.issues, Some(minute(2)));
}

#[tokio::test]
async fn test_pull_request_cutoff_uses_stored_watermark() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    // 80 pull requests, newest first.
    *github.pull_requests.lock().unwrap() =
        (1..=80).rev().map(|n| pull_request_node(n, minute(n))).collect();

    let first = sync_pull_requests(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 80);
    assert_eq!(first.report.watermark, Some(minute(80)));
    assert_eq!(PullRequestReview::find().count(&db).await.unwrap(), 80);

    let ghost = PullRequestReview::find()
        .filter(PullRequestReviewColumn::Pullrequest.eq("PR_1"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ghost.author, GHOST_AUTHOR);

    // Three pull requests move to the top; the rest stay below the mark.
    {
        let mut prs = github.pull_requests.lock().unwrap();
        prs.retain(|n| !["PR_10", "PR_20", "PR_30"].contains(&n["id"].as_str().unwrap_or_default()));
        let mut bumped = vec![
            pull_request_node(30, minute(203)),
            pull_request_node(20, minute(202)),
            pull_request_node(10, minute(201)),
        ];
        bumped.append(&mut prs);
        *prs = bumped;
    }
    let calls_before = github.page_calls();

    let rerun = sync_pull_requests(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();

    let numbers: Vec<_> = rerun.items.iter().map(|p| p.number).collect();
    // PR 80 sits exactly at the mark and is kept; PR 79 stops the run.
    assert_eq!(numbers, vec![30, 20, 10, 80]);
    assert_eq!(rerun.report.stop, StopReason::Exhausted);
    assert_eq!(github.page_calls(), calls_before + 1);
    assert!(github.requests.lock().unwrap().iter().all(|r| r.since.is_none()));
    assert_eq!(rerun.report.watermark, Some(minute(203)));
}

#[tokio::test]
async fn test_limit_stops_without_extra_fetch() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    for number in 1..=120 {
        github.add_issue(number, minute(number), 0, 100);
    }

    let request = SyncRequest::new(repo()).with_limit(50);
    let outcome = sync_issues(&github, &request, Sink::Persist(&db), None)
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 50);
    assert_eq!(outcome.report.stop, StopReason::LimitReached);
    assert_eq!(github.page_calls(), 1);
    assert_eq!(outcome.report.watermark, Some(minute(50)));
}

#[tokio::test]
async fn test_rate_limit_stops_run_and_keeps_progress() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    for number in 1..=60 {
        github.add_issue(number, minute(number), 0, 100);
    }
    *github.quota.lock().unwrap() = repopulse::sync::QuotaSnapshot {
        cost: 500,
        remaining: 100,
    };

    let err = sync_issues(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::RateLimitExceeded { cost: 500, remaining: 100 }));
    assert_eq!(github.page_calls(), 1);
    // Nothing was persisted: entities are committed after pagination completes.
    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 0);
    assert_eq!(load_watermark(&db, &repo()).await.unwrap().issues, None);
}

#[tokio::test]
async fn test_explicit_since_never_lowers_watermark() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    for number in 1..=10 {
        github.add_issue(number, minute(number), 0, 100);
    }

    let _ = sync_issues(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();
    assert_eq!(load_watermark(&db, &repo()).await.unwrap().issues, Some(minute(10)));

    let replay = SyncRequest::new(repo()).with_since(Some(minute(0)));
    let outcome = sync_issues(&github, &replay, Sink::Persist(&db), None)
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 10);
    assert_eq!(outcome.report.watermark, Some(minute(10)));
    assert_eq!(load_watermark(&db, &repo()).await.unwrap().issues, Some(minute(10)));
}

#[tokio::test]
async fn test_emit_mode_leaves_store_untouched() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    github.add_issue(1, minute(1), 2, 100);

    let outcome = sync_issues(&github, &SyncRequest::new(repo()), Sink::Emit, None)
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.report.persisted, 0);
    assert_eq!(IssueEntity::find().count(&db).await.unwrap(), 0);
    assert_eq!(SyncWatermark::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_release_sync_refreshes_download_counts() {
    let db = setup_test_db().await;
    let github = FakeGitHub::new();
    *github.releases.lock().unwrap() = vec![
        release_node("v2.0.0", minute(20), &[("RA_2", 10)]),
        release_node("v1.0.0", minute(10), &[("RA_1", 100)]),
    ];

    let first = sync_releases(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.report.watermark.is_none());

    *github.releases.lock().unwrap() = vec![
        release_node("v2.0.0", minute(20), &[("RA_2", 15)]),
        release_node("v1.0.0", minute(10), &[("RA_1", 130)]),
    ];
    let _ = sync_releases(&github, &SyncRequest::new(repo()), Sink::Persist(&db), None)
        .await
        .unwrap();

    assert_eq!(ReleaseAsset::find().count(&db).await.unwrap(), 2);
    let asset = ReleaseAsset::find_by_id("RA_1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.downloads, 130);
    assert_eq!(asset.release, "RE_v1.0.0");
    assert_eq!(SyncWatermark::find().count(&db).await.unwrap(), 0);
}
