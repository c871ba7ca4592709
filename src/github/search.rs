use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::git::RepoId;
use crate::github::types::{Head, PullRequestSummary};
use crate::github::GitHubError;

/// Which pull requests to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Open PRs authored by the current user
    Authored,
    /// Open PRs where the current user is a requested reviewer
    Review,
}

impl Mode {
    pub fn from_flag(to_review: bool) -> Self {
        if to_review {
            Mode::Review
        } else {
            Mode::Authored
        }
    }
}

/// A GitHub issue search restricted to open PRs of one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    q: String,
}

impl SearchQuery {
    pub fn new(mode: Mode, repo: &RepoId, login: &str) -> Self {
        let filter = match mode {
            Mode::Review => format!("review-requested:{}", login),
            Mode::Authored => format!("author:{}", login),
        };
        Self {
            q: format!("state:open repo:{} type:pr {}", repo, filter),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.q
    }

    /// Query-string parameters for `GET /search/issues`
    pub fn params(&self) -> SearchParams<'_> {
        SearchParams {
            q: &self.q,
            sort: "updated",
            order: "desc",
            per_page: 100,
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.q)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub q: &'a str,
    pub sort: &'static str,
    pub order: &'static str,
    pub per_page: u8,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    number: u64,
    #[serde(default)]
    head: Option<Head>,
    user: SearchUser,
    pull_request: Option<PullRequestLinks>,
}

#[derive(Debug, Deserialize)]
struct SearchUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestLinks {
    html_url: String,
}

/// Map a raw `/search/issues` body to summaries, preserving order.
///
/// Every item must map; a single malformed item fails the whole response.
pub fn parse_search_response(body: Value) -> Result<Vec<PullRequestSummary>, GitHubError> {
    let items = match body {
        Value::Object(mut map) => map.remove("items"),
        _ => None,
    };
    let Some(Value::Array(items)) = items else {
        return Err(GitHubError::MalformedResponse(
            "search response has no 'items' array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let item: SearchItem = serde_json::from_value(raw).map_err(|e| {
                GitHubError::MalformedResponse(format!("search item {}: {}", index, e))
            })?;

            let links = item.pull_request.ok_or_else(|| {
                GitHubError::MalformedResponse(format!(
                    "search item {} (#{}) is not a pull request",
                    index, item.number
                ))
            })?;

            Ok(PullRequestSummary {
                title: item.title,
                number: item.number,
                head: item.head,
                author: item.user.login,
                url: links.html_url,
            })
        })
        .collect()
}
