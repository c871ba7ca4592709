use anyhow::{Context, Result};
use tracing::info;

use crate::browser::UrlOpener;
use crate::cancel::Cancellation;
use crate::git::{RepoId, Vcs};
use crate::github::{Mode, PullRequestApi};
use crate::output::print_status;
use crate::selector::ChoiceValue;

const REMOTE: &str = "origin";

/// Where a run ended up after the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Viewed(String),
    CheckedOut(String),
}

/// Everything the dispatcher talks to
pub struct Collaborators<'a> {
    pub api: &'a dyn PullRequestApi,
    pub vcs: &'a dyn Vcs,
    pub browser: &'a dyn UrlOpener,
    pub cancel: &'a Cancellation,
}

/// Act on the picked row: open the URL, or check out the PR's branch.
///
/// In review mode the branch is fetched from `origin` first and then
/// fast-forwarded to `origin/<branch>`; a diverged branch fails the run.
pub async fn dispatch(
    selection: ChoiceValue,
    mode: Mode,
    repo: &RepoId,
    with: &Collaborators<'_>,
) -> Result<Action> {
    match selection {
        ChoiceValue::View(url) => {
            print_status("Viewing pull request in browser");
            with.browser.open(&url)?;
            Ok(Action::Viewed(url))
        }
        ChoiceValue::Checkout(pr) => {
            // The key listener is stopped once the picker returns, so these
            // checks only stop a run whose token was tripped before dispatch.
            with.cancel.check()?;
            let head_ref = with
                .api
                .head_ref(repo, pr.number)
                .await
                .with_context(|| format!("Failed to look up the branch of #{}", pr.number))?;
            info!(number = pr.number, %head_ref, "resolved head branch");

            if mode == Mode::Review {
                print_status(&format!("fetching {} from {}...", head_ref, REMOTE));
                with.cancel.check()?;
                with.vcs.fetch(REMOTE, &head_ref).await?;
            }

            print_status(&format!("Checking out {}", head_ref));
            with.cancel.check()?;
            with.vcs.checkout(&head_ref).await?;

            if mode == Mode::Review {
                with.cancel.check()?;
                with.vcs
                    .merge_ff_only(&format!("{}/{}", REMOTE, head_ref))
                    .await?;
            }

            Ok(Action::CheckedOut(head_ref))
        }
    }
}
