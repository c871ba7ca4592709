use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::debug;

use crate::git::RepoId;
use crate::github::search::{parse_search_response, SearchQuery};
use crate::github::types::PullRequestSummary;
use crate::github::{GitHubError, PullRequestApi};

/// Create an authenticated GitHub client using a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// Turn an octocrab error into something a user can act on
fn describe_api_error(e: octocrab::Error) -> GitHubError {
    let error_str = format!("{:?}", e);
    if error_str.contains("do not have permission")
        || error_str.contains("resources do not exist")
    {
        GitHubError::Api(
            "Repository not found or no access. Check the remote and your API key's scopes (needs 'repo' for private repos).".to_string(),
        )
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        GitHubError::Api(
            "Authentication failed. Your GitHub API key may be invalid or expired.".to_string(),
        )
    } else if error_str.contains("rate limit") {
        GitHubError::Api(
            "GitHub API rate limit exceeded. Wait a few minutes and try again.".to_string(),
        )
    } else {
        GitHubError::Api(format!("GitHub API error: {}", e))
    }
}

/// [`PullRequestApi`] backed by octocrab
#[derive(Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    pub fn connect(token: &str) -> Result<Self> {
        create_client(token).map(Self::new)
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn current_login(&self) -> Result<String, GitHubError> {
        let user = self
            .client
            .current()
            .user()
            .await
            .map_err(describe_api_error)?;
        Ok(user.login)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<PullRequestSummary>, GitHubError> {
        debug!(%query, "searching pull requests");
        let body: Value = self
            .client
            .get("/search/issues", Some(&query.params()))
            .await
            .map_err(describe_api_error)?;

        let prs = parse_search_response(body)?;
        debug!(count = prs.len(), "search returned");
        Ok(prs)
    }

    async fn head_ref(&self, repo: &RepoId, number: u64) -> Result<String, GitHubError> {
        let pr = self
            .client
            .pulls(&repo.owner, &repo.name)
            .get(number)
            .await
            .map_err(describe_api_error)?;
        Ok(pr.head.ref_field)
    }
}
