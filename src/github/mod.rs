pub mod client;
pub mod search;
pub mod types;

pub use client::{create_client, GitHubClient};
pub use search::{parse_search_response, Mode, SearchQuery};
pub use types::{Head, PullRequestSummary};

use crate::git::RepoId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("{0}")]
    Api(String),

    #[error("Malformed response from GitHub: {0}")]
    MalformedResponse(String),
}

/// The three GitHub calls the picker makes
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Login of the user the token belongs to
    async fn current_login(&self) -> Result<String, GitHubError>;

    /// Run an issue search, results ordered by last update (newest first)
    async fn search(&self, query: &SearchQuery) -> Result<Vec<PullRequestSummary>, GitHubError>;

    /// Authoritative head branch name of a pull request
    async fn head_ref(&self, repo: &RepoId, number: u64) -> Result<String, GitHubError>;
}
