//! Shared fixtures for integration tests: an in-memory store and a fake
//! GitHub that pages canned nodes the way the real API does.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use repopulse::activity::RepoRef;
use repopulse::connect_and_migrate;
use repopulse::sync::{
    CommentPageRequest, EntityKind, Page, PageFetcher, PageInfo, PageRequest, QuotaSnapshot,
    RawMetrics,
};
use repopulse::{Result, SyncError};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

/// Create an in-memory SQLite database with migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

pub fn repo() -> RepoRef {
    RepoRef::new("acme", "widgets")
}

pub fn minute(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n)
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn comment_node(id: &str, at: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "author": { "login": "commenter" },
        "authorAssociation": "CONTRIBUTOR",
        "body": format!("comment {id}"),
        "createdAt": rfc3339(at),
        "publishedAt": rfc3339(at),
        "updatedAt": rfc3339(at),
        "lastEditedAt": null,
        "reactionGroups": [{ "content": "THUMBS_UP", "users": { "totalCount": 1 } }]
    })
}

fn comment_connection(number: i64, comments: &[Value], embedded: usize) -> Value {
    let shown = comments.len().min(embedded);
    let more = comments.len() > embedded;
    json!({
        "nodes": comments[..shown].to_vec(),
        "pageInfo": {
            "endCursor": if more { Some(format!("{number}:{shown}")) } else { None },
            "hasNextPage": more
        }
    })
}

pub fn issue_comments(number: i64, at: DateTime<Utc>, count: usize) -> Vec<Value> {
    (0..count)
        .map(|c| comment_node(&format!("IC_{number}_{c}"), at))
        .collect()
}

/// An issue node with two labels and `comments` comments, `embedded` of which
/// arrive inline.
pub fn issue_node(number: i64, updated: DateTime<Utc>, comments: usize, embedded: usize) -> Value {
    let all = issue_comments(number, updated, comments);
    json!({
        "id": format!("I_{number}"),
        "number": number,
        "author": { "login": "reporter" },
        "authorAssociation": "NONE",
        "title": format!("Issue {number}"),
        "body": "body",
        "createdAt": rfc3339(minute(0)),
        "publishedAt": rfc3339(minute(0)),
        "updatedAt": rfc3339(updated),
        "lastEditedAt": null,
        "closedAt": null,
        "state": "OPEN",
        "locked": false,
        "closed": false,
        "comments": comment_connection(number, &all, embedded),
        "reactionGroups": [{ "content": "HEART", "users": { "totalCount": 2 } }],
        "labels": { "nodes": [{ "name": "bug" }, { "name": format!("area-{}", number % 3) }] },
        "timelineItems": { "nodes": [] }
    })
}

pub fn pull_request_node(number: i64, updated: DateTime<Utc>) -> Value {
    json!({
        "id": format!("PR_{number}"),
        "number": number,
        "author": { "login": "contributor" },
        "authorAssociation": "CONTRIBUTOR",
        "title": format!("PR {number}"),
        "body": "",
        "createdAt": rfc3339(minute(0)),
        "publishedAt": null,
        "updatedAt": rfc3339(updated),
        "lastEditedAt": null,
        "closedAt": null,
        "mergedAt": null,
        "state": "OPEN",
        "locked": false,
        "closed": false,
        "merged": false,
        "mergedBy": null,
        "mergeable": "MERGEABLE",
        "reviewDecision": null,
        "additions": 3,
        "deletions": 1,
        "changedFiles": 1,
        "baseRefName": "main",
        "headRefName": format!("pr-{number}"),
        "comments": { "nodes": [], "pageInfo": { "endCursor": null, "hasNextPage": false } },
        "reactionGroups": [],
        "labels": { "nodes": [] },
        "reviews": { "nodes": [{
            "author": null,
            "authorAssociation": "NONE",
            "body": "",
            "state": "COMMENTED",
            "createdAt": rfc3339(updated),
            "publishedAt": null,
            "lastEditedAt": null,
            "updatedAt": rfc3339(updated),
            "submittedAt": null
        }] },
        "files": { "nodes": [{ "path": "src/lib.rs", "additions": 3, "deletions": 1 }] },
        "timelineItems": { "nodes": [] }
    })
}

pub fn release_node(tag: &str, created: DateTime<Utc>, assets: &[(&str, i64)]) -> Value {
    json!({
        "id": format!("RE_{tag}"),
        "name": tag,
        "description": null,
        "url": format!("https://github.com/acme/widgets/releases/tag/{tag}"),
        "createdAt": rfc3339(created),
        "isPrerelease": false,
        "tagName": tag,
        "releaseAssets": { "nodes": assets.iter().map(|(id, downloads)| json!({
            "id": id,
            "name": format!("{id}.tar.gz"),
            "downloadCount": downloads,
            "size": 2048
        })).collect::<Vec<_>>() }
    })
}

/// A remote repository served page by page.
///
/// Issues are kept oldest-first and filtered by `since` (inclusive) on the
/// "server"; pull requests and releases are served newest-first unfiltered.
/// Cursors are stringified offsets.
#[derive(Default)]
pub struct FakeGitHub {
    pub issues: Mutex<Vec<Value>>,
    pub pull_requests: Mutex<Vec<Value>>,
    pub releases: Mutex<Vec<Value>>,
    /// Full comment lists by issue or pull request number.
    pub comments: Mutex<HashMap<i64, Vec<Value>>>,
    pub metrics: Mutex<RawMetrics>,
    pub requests: Mutex<Vec<PageRequest>>,
    pub comment_requests: Mutex<Vec<CommentPageRequest>>,
    pub quota: Mutex<QuotaSnapshot>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            quota: Mutex::new(QuotaSnapshot {
                cost: 1,
                remaining: 5000,
            }),
            ..Self::default()
        }
    }

    /// Add an issue, registering its full comment list for continuations.
    pub fn add_issue(&self, number: i64, updated: DateTime<Utc>, comments: usize, embedded: usize) {
        self.comments
            .lock()
            .unwrap()
            .insert(number, issue_comments(number, updated, comments));
        self.update_issue(issue_node(number, updated, comments, embedded));
    }

    pub fn page_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Replace the issue with the same id, keeping oldest-first order.
    pub fn update_issue(&self, node: Value) {
        let mut issues = self.issues.lock().unwrap();
        issues.retain(|n| n["id"] != node["id"]);
        issues.push(node);
        issues.sort_by_key(|n| n["updatedAt"].as_str().unwrap_or_default().to_string());
    }

    fn slice(nodes: &[Value], after: Option<&str>, first: u32) -> Page {
        let start = after.and_then(|c| c.parse::<usize>().ok()).unwrap_or(0);
        let end = (start + first as usize).min(nodes.len());
        let more = end < nodes.len();
        Page {
            nodes: nodes[start..end].to_vec(),
            page_info: PageInfo {
                end_cursor: more.then(|| end.to_string()),
                has_next_page: more,
            },
            quota: QuotaSnapshot::default(),
        }
    }
}

fn updated_at(node: &Value) -> DateTime<Utc> {
    node["updatedAt"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

#[async_trait]
impl PageFetcher for FakeGitHub {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        self.requests.lock().unwrap().push(request.clone());

        let nodes: Vec<Value> = match request.kind {
            EntityKind::Issues => self
                .issues
                .lock()
                .unwrap()
                .iter()
                .filter(|n| request.since.is_none_or(|since| updated_at(n) >= since))
                .cloned()
                .collect(),
            EntityKind::PullRequests => self.pull_requests.lock().unwrap().clone(),
            EntityKind::Releases => self.releases.lock().unwrap().clone(),
        };

        let mut page = Self::slice(&nodes, request.after.as_deref(), request.first);
        page.quota = *self.quota.lock().unwrap();
        Ok(page)
    }

    async fn fetch_comments(&self, request: &CommentPageRequest) -> Result<Page> {
        self.comment_requests.lock().unwrap().push(request.clone());

        let comments = self.comments.lock().unwrap();
        let all = comments
            .get(&request.number)
            .ok_or_else(|| SyncError::transport(format!("no comments for #{}", request.number)))?;
        let offset = request
            .after
            .split_once(':')
            .map(|(_, offset)| offset)
            .unwrap_or(&request.after);

        let mut page = Self::slice(all, Some(offset), request.first);
        page.quota = *self.quota.lock().unwrap();
        Ok(page)
    }

    async fn fetch_metrics(&self, _repo: &RepoRef) -> Result<RawMetrics> {
        Ok(self.metrics.lock().unwrap().clone())
    }
}
