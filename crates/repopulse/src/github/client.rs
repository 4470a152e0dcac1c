//! GitHub API client and its `PageFetcher` implementation.

use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GitHubError;
use super::query::{
    CommentVariables, ConnectionVariables, GraphQlRequest, ISSUE_COMMENTS, ISSUES,
    PULL_REQUEST_COMMENTS, PULL_REQUESTS, RELEASES,
};
use crate::activity::RepoRef;
use crate::error::{MappedKind, MappingError, Result, SyncError};
use crate::retry::{RetryPolicy, retry_transient};
use crate::sync::{
    CommentPageRequest, EntityKind, NESTED_PAGE_SIZE, Page, PageFetcher, PageInfo, PageRequest,
    ProgressCallback, QuotaSnapshot, RawMetrics,
};

/// Public GitHub API root.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("repopulse/", env!("CARGO_PKG_VERSION"));

/// Create an authenticated Octocrab instance against `endpoint`.
pub fn create_client(token: &str, endpoint: &str) -> std::result::Result<Octocrab, GitHubError> {
    Octocrab::builder()
        .base_uri(endpoint)?
        .personal_token(token.to_string())
        .build()
        .map_err(GitHubError::Api)
}

/// Bearer token that never shows up in `Debug` output.
#[derive(Clone)]
struct Token(Arc<String>);

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    #[serde(default)]
    nodes: Vec<Value>,
    page_info: PageInfo,
}

#[derive(Serialize)]
struct PerPage {
    per_page: u32,
}

/// GitHub client: GraphQL v4 for activity, REST v3 for traffic.
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    /// Shared HTTP client for GraphQL requests.
    http_client: reqwest::Client,
    graphql_url: String,
    token: Token,
    retry: RetryPolicy,
    on_retry: Option<ProgressCallback>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("graphql_url", &self.graphql_url)
            .field("token", &self.token)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client for the public GitHub API.
    pub fn new(token: &str) -> std::result::Result<Self, GitHubError> {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Create a client for a specific API root (GitHub Enterprise, tests).
    pub fn with_endpoint(token: &str, endpoint: &str) -> std::result::Result<Self, GitHubError> {
        let endpoint = endpoint.trim_end_matches('/');
        let client = create_client(token, endpoint)?;
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(client),
            http_client,
            graphql_url: format!("{endpoint}/graphql"),
            token: Token(Arc::new(token.to_string())),
            retry: RetryPolicy::default(),
            on_retry: None,
        })
    }

    /// Override the transport retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Report transport retries through `callback`.
    #[must_use]
    pub fn with_retry_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_retry = Some(callback);
        self
    }

    async fn post_graphql_once<V: Serialize + Sync>(
        &self,
        body: &GraphQlRequest<'_, V>,
    ) -> std::result::Result<Value, GitHubError> {
        let response = self
            .http_client
            .post(&self.graphql_url)
            .bearer_auth(self.token.0.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GitHubError::AuthFailed {
                    status: status.as_u16(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(GitHubError::NotFound(self.graphql_url.clone()));
            }
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(GitHubError::Status {
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| GitHubError::Decode(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let not_found = envelope
                .errors
                .iter()
                .any(|e| e.kind.as_deref() == Some("NOT_FOUND"));
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            let message = messages.join("; ");
            return Err(if not_found {
                GitHubError::NotFound(message)
            } else {
                GitHubError::GraphQl(message)
            });
        }
        envelope
            .data
            .ok_or_else(|| GitHubError::Decode("response has neither data nor errors".into()))
    }

    /// Run one GraphQL query, retrying transient failures.
    async fn graphql<V: Serialize + Sync>(
        &self,
        label: &str,
        query: &str,
        variables: V,
    ) -> std::result::Result<Value, GitHubError> {
        let body = GraphQlRequest { query, variables };
        retry_transient(
            &self.retry,
            label,
            self.on_retry.as_ref(),
            GitHubError::is_retryable,
            || self.post_graphql_once(&body),
        )
        .await
    }

    /// GET a REST route, first page only.
    async fn rest_get(&self, route: &str) -> std::result::Result<Value, GitHubError> {
        let params = PerPage {
            per_page: NESTED_PAGE_SIZE,
        };
        retry_transient(
            &self.retry,
            route,
            self.on_retry.as_ref(),
            GitHubError::is_retryable,
            || async {
                self.inner
                    .get::<Value, _, _>(route, Some(&params))
                    .await
                    .map_err(GitHubError::from)
            },
        )
        .await
    }
}

/// Read the value at `path`, a missing or null step being a shape mismatch.
fn take<T: DeserializeOwned>(
    data: &mut Value,
    path: &[&str],
    kind: MappedKind,
) -> std::result::Result<T, MappingError> {
    let mut cursor = data;
    for key in path {
        cursor = cursor
            .get_mut(*key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| MappingError::new(kind, format!("missing `{}`", path.join("."))))?;
    }
    serde_json::from_value(cursor.take())
        .map_err(|e| MappingError::new(kind, format!("{}: {e}", path.join("."))))
}

/// Split a response into the page at `path` and the quota snapshot.
fn into_page(
    mut data: Value,
    path: &[&str],
    kind: MappedKind,
) -> std::result::Result<Page, MappingError> {
    let quota: QuotaSnapshot = take(&mut data, &["rateLimit"], kind)?;
    let connection: Connection = take(&mut data, path, kind)?;
    Ok(Page {
        nodes: connection.nodes,
        page_info: connection.page_info,
        quota,
    })
}

fn connection_field(kind: EntityKind) -> (&'static str, &'static str) {
    match kind {
        EntityKind::Issues => (ISSUES, "issues"),
        EntityKind::PullRequests => (PULL_REQUESTS, "pullRequests"),
        EntityKind::Releases => (RELEASES, "releases"),
    }
}

#[async_trait]
impl PageFetcher for GitHubClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let (query, field) = connection_field(request.kind);
        let variables = ConnectionVariables {
            since: request.since,
            ..ConnectionVariables::new(&request.repo, request.first, request.after.as_deref())
        };

        let label = format!("{} page", request.kind);
        let data = self.graphql(&label, query, variables).await?;
        Ok(into_page(data, &["repository", field], request.kind.into())?)
    }

    async fn fetch_comments(&self, request: &CommentPageRequest) -> Result<Page> {
        let (query, parent) = match request.kind {
            EntityKind::Issues => (ISSUE_COMMENTS, "issue"),
            EntityKind::PullRequests => (PULL_REQUEST_COMMENTS, "pullRequest"),
            EntityKind::Releases => {
                return Err(SyncError::transport(
                    "releases have no comment connection",
                ));
            }
        };
        let variables = CommentVariables {
            owner: &request.repo.owner,
            name: &request.repo.name,
            number: request.number,
            first: request.first,
            after: &request.after,
        };

        let label = format!("{} #{} comments", request.kind, request.number);
        let data = self.graphql(&label, query, variables).await?;
        Ok(into_page(
            data,
            &["repository", parent, "comments"],
            MappedKind::Comment,
        )?)
    }

    async fn fetch_metrics(&self, repo: &RepoRef) -> Result<RawMetrics> {
        let base = format!("/repos/{}/{}", repo.owner, repo.name);
        tracing::debug!(%repo, per_page = NESTED_PAGE_SIZE, "Fetching traffic and audience");

        Ok(RawMetrics {
            clones: self.rest_get(&format!("{base}/traffic/clones")).await?,
            views: self.rest_get(&format!("{base}/traffic/views")).await?,
            paths: self.rest_get(&format!("{base}/traffic/popular/paths")).await?,
            referrers: self.rest_get(&format!("{base}/traffic/popular/referrers")).await?,
            forks: self.rest_get(&format!("{base}/forks")).await?,
            stargazers: self.rest_get(&format!("{base}/stargazers")).await?,
            watchers: self.rest_get(&format!("{base}/subscribers")).await?,
        })
    }
}

#[cfg(test)]
mod tests {

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;


    async fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::with_endpoint("test-token", &server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::immediate(3))
    }

    fn issues_page() -> Value {
        json!({
            "data": {
                "rateLimit": { "cost": 1, "remaining": 4999, "resetAt": "2024-01-01T01:00:00Z" },
                "repository": {
                    "issues": {
                        "pageInfo": { "endCursor": "Y3Vyc29yOjE=", "hasNextPage": true },
                        "nodes": [{ "id": "I_1" }, { "id": "I_2" }]
                    }
                }
            }
        })
    }

    fn request(kind: EntityKind) -> PageRequest {
        PageRequest {
            kind,
            repo: RepoRef::new("acme", "widgets"),
            since: None,
            after: None,
            first: 50,
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Token(Arc::new("ghp_secret".to_string())));
        assert!(!rendered.contains("ghp_secret"));
    }

    #[tokio::test]
    async fn test_fetch_page_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_string_contains("issues(first: $first"))
            .and(body_partial_json(json!({
                "variables": { "owner": "acme", "name": "widgets", "first": 50 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.fetch_page(&request(EntityKind::Issues)).await.unwrap();

        assert_eq!(page.nodes.len(), 2);
        assert_eq!(page.nodes[0]["id"], "I_1");
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjE="));
        assert_eq!(page.quota, QuotaSnapshot { cost: 1, remaining: 4999 });
    }

    #[tokio::test]
    async fn test_fetch_page_sends_since_for_issues() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "since": "2024-01-01T00:00:00Z" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let since = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut req = request(EntityKind::Issues);
        req.since = Some(since);
        client.fetch_page(&req).await.unwrap();
    }

    #[tokio::test]
    async fn test_graphql_errors_are_transport_errors_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Could not resolve to a Repository with the name 'acme/nope'." }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_page(&request(EntityKind::PullRequests))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Transport { .. }));
        assert!(err.to_string().contains("Could not resolve"));
    }

    #[tokio::test]
    async fn test_missing_repository_is_reported_as_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "repository": null },
                "errors": [{
                    "type": "NOT_FOUND",
                    "path": ["repository"],
                    "message": "Could not resolve to a Repository with the name 'acme/nope'."
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_page(&request(EntityKind::Issues))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Transport { .. }));
        assert!(err.to_string().contains("Not found"));
    }

    #[tokio::test]
    async fn test_bad_gateway_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issues_page()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.fetch_page(&request(EntityKind::Issues)).await.unwrap();
        assert_eq!(page.nodes.len(), 2);
    }

    #[tokio::test]
    async fn test_server_errors_give_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_page(&request(EntityKind::Releases))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_page(&request(EntityKind::Issues))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_fetch_comments_reads_nested_connection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("pullRequest(number: $number)"))
            .and(body_partial_json(json!({
                "variables": { "number": 12, "after": "c1", "first": 50 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "rateLimit": { "cost": 1, "remaining": 4000, "resetAt": "2024-01-01T01:00:00Z" },
                    "repository": {
                        "pullRequest": {
                            "comments": {
                                "pageInfo": { "endCursor": "c2", "hasNextPage": false },
                                "nodes": [{ "id": "PC_1" }]
                            }
                        }
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client
            .fetch_comments(&CommentPageRequest {
                kind: EntityKind::PullRequests,
                repo: RepoRef::new("acme", "widgets"),
                number: 12,
                after: "c1".to_string(),
                first: 50,
            })
            .await
            .unwrap();

        assert_eq!(page.nodes[0]["id"], "PC_1");
        assert!(!page.page_info.has_next_page);
        assert_eq!(page.quota.remaining, 4000);
    }

    #[tokio::test]
    async fn test_missing_rate_limit_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "repository": { "issues": { "pageInfo": { "endCursor": null, "hasNextPage": false }, "nodes": [] } } }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .fetch_page(&request(EntityKind::Issues))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Mapping(_)));
        assert!(err.to_string().contains("rateLimit"));
    }

    #[tokio::test]
    async fn test_fetch_metrics_calls_each_collection() {
        let server = MockServer::start().await;
        let routes = [
            ("/repos/acme/widgets/traffic/clones", json!({ "count": 3, "uniques": 1, "clones": [] })),
            ("/repos/acme/widgets/traffic/views", json!({ "count": 9, "uniques": 4, "views": [] })),
            ("/repos/acme/widgets/traffic/popular/paths", json!([])),
            ("/repos/acme/widgets/traffic/popular/referrers", json!([])),
            ("/repos/acme/widgets/forks", json!([{ "full_name": "x/widgets" }])),
            ("/repos/acme/widgets/stargazers", json!([{ "login": "a" }])),
            ("/repos/acme/widgets/subscribers", json!([{ "login": "b" }])),
        ];
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server).await;
        let raw = client
            .fetch_metrics(&RepoRef::new("acme", "widgets"))
            .await
            .unwrap();

        assert_eq!(raw.clones["count"], 3);
        assert_eq!(raw.views["uniques"], 4);
        assert_eq!(raw.forks[0]["full_name"], "x/widgets");
        assert_eq!(raw.watchers[0]["login"], "b");
    }
}
