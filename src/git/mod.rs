pub mod remote;

pub use remote::{RemoteUrlError, RepoId};

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git is not installed or not on PATH")]
    NotInstalled,

    #[error("Failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// Key/value access to the repository's git configuration
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns the trimmed value, or None when the key is unset or empty
    async fn get(&self, key: &str) -> Result<Option<String>, GitError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), GitError>;
}

/// The branch operations needed to check out a pull request
#[async_trait]
pub trait Vcs: Send + Sync {
    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), GitError>;

    async fn checkout(&self, branch: &str) -> Result<(), GitError>;

    /// Merge `target` into the current branch, refusing anything but a fast-forward
    async fn merge_ff_only(&self, target: &str) -> Result<(), GitError>;
}

/// Runs the `git` binary as a subprocess
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    working_dir: Option<PathBuf>,
}

/// Raw result of a git invocation that was allowed to exit non-zero
struct GitOutput {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git in `dir` instead of the current directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    async fn output(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git");

        let mut cmd = Command::new("git");
        cmd.args(args);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::NotInstalled
            } else {
                GitError::Spawn {
                    command: command.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.output(args).await?;
        if output.code == Some(0) {
            return Ok(output.stdout);
        }

        let stderr = if output.stderr.is_empty() {
            match output.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            output.stderr
        };

        Err(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            stderr,
        })
    }
}

#[async_trait]
impl ConfigStore for GitCli {
    async fn get(&self, key: &str) -> Result<Option<String>, GitError> {
        let output = self.output(&["config", "--get", key]).await?;
        match output.code {
            Some(0) if output.stdout.is_empty() => Ok(None),
            Some(0) => Ok(Some(output.stdout)),
            // `git config --get` exits 1 when the key is not set
            Some(1) if output.stderr.is_empty() => Ok(None),
            _ => Err(GitError::CommandFailed {
                command: format!("git config --get {}", key),
                stderr: output.stderr,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.run(&["config", "--add", key, value]).await?;
        Ok(())
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(&["fetch", remote, branch]).await?;
        Ok(())
    }

    async fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).await?;
        Ok(())
    }

    async fn merge_ff_only(&self, target: &str) -> Result<(), GitError> {
        self.run(&["merge", target, "--ff-only"]).await?;
        Ok(())
    }
}
