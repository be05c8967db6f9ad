//! Git replication adapter.
//!
//! Wraps the shared repository as three opaque operations: pull before any
//! read, and stage+commit+push as one publish unit after a write. Each step
//! runs `git` as a child process; the first failing step aborts the whole
//! operation. Retries and merge conflict resolution are left to the operator.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

use crate::domain::errors::SyncError;
use crate::domain::ports::Replica;

/// Replica backed by a local clone of the shared git repository.
pub struct GitReplica {
    repo_dir: PathBuf,
}

impl GitReplica {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Run one git subcommand in the repository, failing on non-zero exit.
    async fn run_git(&self, op: &str, args: &[&str]) -> Result<(), SyncError> {
        debug!(op, ?args, "Running git");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| SyncError::Spawn {
                op: op.to_string(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!(op, %stderr, "git command failed");
        Err(classify_failure(op, stderr))
    }
}

/// Best-effort classification of a failed git step by its stderr.
///
/// Only `NonFastForward` is retryable by the operator; the rest are genuine
/// fatal conditions.
fn classify_failure(op: &str, stderr: String) -> SyncError {
    let lower = stderr.to_ascii_lowercase();
    if lower.contains("non-fast-forward")
        || lower.contains("fetch first")
        || lower.contains("[rejected]")
    {
        SyncError::NonFastForward { stderr }
    } else if lower.contains("authentication failed")
        || lower.contains("permission denied")
        || lower.contains("could not read username")
    {
        SyncError::Auth { stderr }
    } else if lower.contains("could not resolve host")
        || lower.contains("unable to access")
        || lower.contains("connection timed out")
        || lower.contains("connection refused")
    {
        SyncError::Network { stderr }
    } else {
        SyncError::Command {
            op: op.to_string(),
            stderr,
        }
    }
}

#[async_trait]
impl Replica for GitReplica {
    #[instrument(skip(self), fields(repo = %self.repo_dir.display()))]
    async fn pull(&self) -> Result<(), SyncError> {
        self.run_git("pull", &["pull", "--ff-only"]).await?;
        info!("Local copy is in sync with upstream");
        Ok(())
    }

    #[instrument(skip(self, paths, message), fields(repo = %self.repo_dir.display()))]
    async fn publish(&self, paths: &[&Path], message: &str) -> Result<(), SyncError> {
        let path_strs: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let mut add_args = vec!["add", "--"];
        add_args.extend(path_strs.iter().map(String::as_str));
        self.run_git("add", &add_args).await?;

        self.run_git("commit", &["commit", "-m", message]).await?;
        self.run_git("push", &["push"]).await?;

        info!(%message, "Published to shared upstream");
        Ok(())
    }
}
