use thiserror::Error;
use tracing::info;

use crate::cancel::Cancellation;
use crate::git::{ConfigStore, GitError, RemoteUrlError, RepoId};
use crate::github::{GitHubError, PullRequestApi};

pub const API_KEY: &str = "github.apiKey";
pub const USER_LOGIN: &str = "github.user";
pub const REMOTE_URL: &str = "remote.origin.url";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Github API key not found. Please run `git config github.apiKey <YOUR_GITHUB_API_KEY>`")]
    MissingApiKey,

    #[error("No remote named 'origin' is configured for this repository")]
    MissingRemote,

    #[error(transparent)]
    RemoteUrl(#[from] RemoteUrlError),

    #[error("Failed to read git config: {0}")]
    Store(#[from] GitError),

    #[error("Failed to look up the authenticated user: {0}")]
    Login(#[from] GitHubError),
}

/// API key from `github.apiKey`; unset or empty is [`ConfigError::MissingApiKey`]
pub async fn resolve_api_key(store: &dyn ConfigStore) -> Result<String, ConfigError> {
    store.get(API_KEY).await?.ok_or(ConfigError::MissingApiKey)
}

/// Cached `github.user`, or the authenticated login which is then saved
pub async fn resolve_user_login(
    store: &dyn ConfigStore,
    api: &dyn PullRequestApi,
    cancel: &Cancellation,
) -> anyhow::Result<String> {
    if let Some(login) = store.get(USER_LOGIN).await.map_err(ConfigError::from)? {
        return Ok(login);
    }

    cancel.check()?;
    let login = api.current_login().await.map_err(ConfigError::from)?;
    let login = login.trim().to_string();

    cancel.check()?;
    store.set(USER_LOGIN, &login).await.map_err(ConfigError::from)?;
    info!(%login, "saved {} to git config", USER_LOGIN);

    Ok(login)
}

/// owner/name of the `origin` remote
pub async fn resolve_repo(store: &dyn ConfigStore) -> Result<RepoId, ConfigError> {
    let url = store.get(REMOTE_URL).await?.ok_or(ConfigError::MissingRemote)?;
    Ok(RepoId::parse(&url)?)
}
