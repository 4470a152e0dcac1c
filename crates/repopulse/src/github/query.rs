//! GraphQL documents and their variables.
//!
//! Fragments are spliced in with `concat!` so each document is a single
//! `&'static str` sent verbatim.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::RepoRef;

macro_rules! rate_limit_selection {
    () => {
        "rateLimit { cost remaining resetAt }"
    };
}

macro_rules! comment_fragment {
    () => {
        "fragment CommentFields on IssueComment {
  id
  author { login }
  authorAssociation
  body
  createdAt
  publishedAt
  updatedAt
  lastEditedAt
  reactionGroups { content users { totalCount } }
}
"
    };
}

pub(crate) const ISSUES: &str = concat!(
    "query Issues($owner: String!, $name: String!, $first: Int!, $after: String, $since: DateTime) {
  ",
    rate_limit_selection!(),
    "
  repository(owner: $owner, name: $name) {
    issues(first: $first, after: $after, filterBy: { since: $since }, orderBy: { field: UPDATED_AT, direction: ASC }) {
      pageInfo { endCursor hasNextPage }
      nodes {
        id
        number
        author { login }
        authorAssociation
        title
        body
        createdAt
        publishedAt
        updatedAt
        lastEditedAt
        closedAt
        state
        locked
        closed
        comments(first: 100) {
          pageInfo { endCursor hasNextPage }
          nodes { ...CommentFields }
        }
        reactionGroups { content users { totalCount } }
        labels(first: 100) { nodes { name } }
        timelineItems(itemTypes: CLOSED_EVENT, last: 1) {
          nodes { ... on ClosedEvent { actor { login } } }
        }
      }
    }
  }
}
",
    comment_fragment!()
);

pub(crate) const PULL_REQUESTS: &str = concat!(
    "query PullRequests($owner: String!, $name: String!, $first: Int!, $after: String) {
  ",
    rate_limit_selection!(),
    "
  repository(owner: $owner, name: $name) {
    pullRequests(first: $first, after: $after, orderBy: { field: UPDATED_AT, direction: DESC }) {
      pageInfo { endCursor hasNextPage }
      nodes {
        id
        number
        author { login }
        authorAssociation
        title
        body
        createdAt
        publishedAt
        updatedAt
        lastEditedAt
        closedAt
        mergedAt
        state
        locked
        closed
        merged
        mergedBy { login }
        mergeable
        reviewDecision
        additions
        deletions
        changedFiles
        baseRefName
        headRefName
        comments(first: 100) {
          pageInfo { endCursor hasNextPage }
          nodes { ...CommentFields }
        }
        reactionGroups { content users { totalCount } }
        labels(first: 100) { nodes { name } }
        reviews(first: 100) {
          nodes {
            author { login }
            authorAssociation
            body
            state
            createdAt
            publishedAt
            lastEditedAt
            updatedAt
            submittedAt
          }
        }
        files(first: 100) { nodes { path additions deletions } }
        timelineItems(itemTypes: CLOSED_EVENT, last: 1) {
          nodes { ... on ClosedEvent { actor { login } } }
        }
      }
    }
  }
}
",
    comment_fragment!()
);

pub(crate) const RELEASES: &str = concat!(
    "query Releases($owner: String!, $name: String!, $first: Int!, $after: String) {
  ",
    rate_limit_selection!(),
    "
  repository(owner: $owner, name: $name) {
    releases(first: $first, after: $after, orderBy: { field: CREATED_AT, direction: DESC }) {
      pageInfo { endCursor hasNextPage }
      nodes {
        id
        name
        description
        url
        createdAt
        isPrerelease
        tagName
        releaseAssets(first: 100) { nodes { id name downloadCount size } }
      }
    }
  }
}
"
);

pub(crate) const ISSUE_COMMENTS: &str = concat!(
    "query IssueComments($owner: String!, $name: String!, $number: Int!, $first: Int!, $after: String) {
  ",
    rate_limit_selection!(),
    "
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      comments(first: $first, after: $after) {
        pageInfo { endCursor hasNextPage }
        nodes { ...CommentFields }
      }
    }
  }
}
",
    comment_fragment!()
);

pub(crate) const PULL_REQUEST_COMMENTS: &str = concat!(
    "query PullRequestComments($owner: String!, $name: String!, $number: Int!, $first: Int!, $after: String) {
  ",
    rate_limit_selection!(),
    "
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      comments(first: $first, after: $after) {
        pageInfo { endCursor hasNextPage }
        nodes { ...CommentFields }
      }
    }
  }
}
",
    comment_fragment!()
);

/// Variables for a top-level connection query.
#[derive(Debug, Serialize)]
pub(crate) struct ConnectionVariables<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub first: u32,
    pub after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

/// Variables for a comment continuation query.
#[derive(Debug, Serialize)]
pub(crate) struct CommentVariables<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub number: i64,
    pub first: u32,
    pub after: &'a str,
}

/// Request body for `POST /graphql`.
#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

impl<'a> ConnectionVariables<'a> {
    pub fn new(repo: &'a RepoRef, first: u32, after: Option<&'a str>) -> Self {
        Self {
            owner: &repo.owner,
            name: &repo.name,
            first,
            after,
            since: None,
        }
    }
}
