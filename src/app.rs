use anyhow::Result;
use tracing::{debug, info};

use crate::browser::UrlOpener;
use crate::cancel::{Cancellation, Cancelled};
use crate::config;
use crate::dispatch::{dispatch, Action, Collaborators};
use crate::git::{ConfigStore, Vcs};
use crate::github::{Mode, PullRequestApi, SearchQuery};
use crate::selector::{build_choices, Selector};

pub const PROMPT: &str = "Select a PR to checkout";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The search came back empty
    NothingFound,
    Viewed(String),
    CheckedOut(String),
    /// Escape (or Ctrl-C) was pressed
    Cancelled,
}

impl From<Action> for Outcome {
    fn from(action: Action) -> Self {
        match action {
            Action::Viewed(url) => Outcome::Viewed(url),
            Action::CheckedOut(branch) => Outcome::CheckedOut(branch),
        }
    }
}

/// The local side of a run: git, browser, terminal
pub struct Deps<'a> {
    pub store: &'a dyn ConfigStore,
    pub vcs: &'a dyn Vcs,
    pub browser: &'a dyn UrlOpener,
    pub selector: &'a mut dyn Selector,
    pub cancel: &'a Cancellation,
}

/// Resolve settings, search, let the user pick, then act on the pick.
///
/// `connect` builds the GitHub client from the API key. It is not called
/// when no key is configured, so a missing key never reaches the network.
pub async fn run<A, F>(mode: Mode, deps: Deps<'_>, connect: F) -> Result<Outcome>
where
    A: PullRequestApi,
    F: FnOnce(&str) -> Result<A>,
{
    match run_steps(mode, deps, connect).await {
        Err(e) if e.is::<Cancelled>() => Ok(Outcome::Cancelled),
        other => other,
    }
}

async fn run_steps<A, F>(mode: Mode, deps: Deps<'_>, connect: F) -> Result<Outcome>
where
    A: PullRequestApi,
    F: FnOnce(&str) -> Result<A>,
{
    let Deps {
        store,
        vcs,
        browser,
        selector,
        cancel,
    } = deps;

    cancel.check()?;
    let token = config::resolve_api_key(store).await?;
    let api = connect(&token)?;

    let login = config::resolve_user_login(store, &api, cancel).await?;
    cancel.check()?;
    let repo = config::resolve_repo(store).await?;
    debug!(%login, %repo, ?mode, "resolved settings");

    let query = SearchQuery::new(mode, &repo, &login);
    cancel.check()?;
    let prs = api.search(&query).await?;
    info!(count = prs.len(), "found pull requests");

    if prs.is_empty() {
        return Ok(Outcome::NothingFound);
    }

    let choices = build_choices(&prs, mode);
    let Some(selection) = selector.select(PROMPT, choices, cancel).await? else {
        return Ok(Outcome::Cancelled);
    };

    let with = Collaborators {
        api: &api,
        vcs,
        browser,
        cancel,
    };
    let action = dispatch(selection, mode, &repo, &with).await?;

    Ok(action.into())
}

/// Process exit status for a finished run.
///
/// Finding nothing and being cancelled are successes; a missing API key
/// and every other fault exit 1.
pub fn exit_code(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

/// True when the run stopped because `github.apiKey` is not configured
pub fn is_missing_api_key(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<config::ConfigError>(),
        Some(config::ConfigError::MissingApiKey)
    )
}
