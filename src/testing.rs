//! In-memory collaborators for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::browser::UrlOpener;
use crate::cancel::Cancellation;
use crate::git::{ConfigStore, GitError, RepoId, Vcs};
use crate::github::{GitHubError, PullRequestApi, PullRequestSummary, SearchQuery};
use crate::selector::{Choice, ChoiceValue, Selector};

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.lock().unwrap();
            for (key, value) in entries {
                values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, GitError> {
        Ok(self
            .values
            .lock()
            .unwrap()
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

pub fn summary(number: u64, title: &str, author: &str) -> PullRequestSummary {
    PullRequestSummary {
        title: title.to_string(),
        number,
        head: None,
        author: author.to_string(),
        url: format!("https://github.com/octo/widgets/pull/{}", number),
    }
}

pub struct FakeApi {
    login: String,
    results: Vec<PullRequestSummary>,
    heads: HashMap<u64, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            results: Vec::new(),
            heads: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(mut self, results: Vec<PullRequestSummary>) -> Self {
        self.results = results;
        self
    }

    pub fn with_head(mut self, number: u64, head: &str) -> Self {
        self.heads.insert(number, head.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PullRequestApi for FakeApi {
    async fn current_login(&self) -> Result<String, GitHubError> {
        self.record("current_login".to_string());
        Ok(self.login.clone())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<PullRequestSummary>, GitHubError> {
        self.record(format!("search {}", query));
        Ok(self.results.clone())
    }

    async fn head_ref(&self, repo: &RepoId, number: u64) -> Result<String, GitHubError> {
        self.record(format!("head_ref {}#{}", repo, number));
        self.heads
            .get(&number)
            .cloned()
            .ok_or_else(|| GitHubError::Api(format!("no pull request #{}", number)))
    }
}

/// Records git operations; `merge_ff_only` fails when `diverged` is set
#[derive(Default)]
pub struct RecordingVcs {
    pub diverged: bool,
    ops: Mutex<Vec<String>>,
}

impl RecordingVcs {
    pub fn diverged() -> Self {
        Self {
            diverged: true,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl Vcs for RecordingVcs {
    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.ops.lock().unwrap().push(format!("fetch {} {}", remote, branch));
        Ok(())
    }

    async fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.ops.lock().unwrap().push(format!("checkout {}", branch));
        Ok(())
    }

    async fn merge_ff_only(&self, target: &str) -> Result<(), GitError> {
        self.ops.lock().unwrap().push(format!("merge --ff-only {}", target));
        if self.diverged {
            return Err(GitError::CommandFailed {
                command: format!("git merge {} --ff-only", target),
                stderr: "fatal: Not possible to fast-forward, aborting.".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Picks a fixed index, or cancels when `pick` is None
pub struct ScriptedSelector {
    pick: Option<usize>,
    pub seen: Vec<Choice>,
}

impl ScriptedSelector {
    pub fn picking(index: usize) -> Self {
        Self {
            pick: Some(index),
            seen: Vec::new(),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            pick: None,
            seen: Vec::new(),
        }
    }
}

#[async_trait]
impl Selector for ScriptedSelector {
    async fn select(
        &mut self,
        _prompt: &str,
        choices: Vec<Choice>,
        cancel: &Cancellation,
    ) -> anyhow::Result<Option<ChoiceValue>> {
        self.seen = choices.clone();
        match self.pick {
            Some(index) => Ok(choices.into_iter().nth(index).map(|c| c.value)),
            None => {
                cancel.cancel();
                Ok(None)
            }
        }
    }
}
