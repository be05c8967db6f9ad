//! Process sandbox adapter.
//!
//! Runs the candidate solution as an isolated child process: no stdin, no
//! arguments, stdout and stderr captured separately, bounded by a wall-clock
//! timeout. On timeout the child is killed via `kill_on_drop` and the report
//! carries `timed_out: true`.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::{GameError, GameResult};
use crate::domain::ports::{ExecutionReport, Sandbox};

/// Sandbox backed by a native child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessSandbox;

impl ProcessSandbox {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sandbox for ProcessSandbox {
    async fn run(&self, artifact: &Path, timeout: Duration) -> GameResult<ExecutionReport> {
        debug!(artifact = %artifact.display(), ?timeout, "Spawning candidate");

        let child = Command::new(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                GameError::SolutionRuntime(format!(
                    "failed to launch {}: {err}",
                    artifact.display()
                ))
            })?;

        // wait_with_output owns the child; dropping the future on timeout
        // kills the process through kill_on_drop.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ExecutionReport {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
                timed_out: false,
            }),
            Ok(Err(err)) => Err(GameError::SolutionRuntime(format!(
                "failed waiting for {}: {err}",
                artifact.display()
            ))),
            Err(_) => {
                warn!(artifact = %artifact.display(), ?timeout, "Candidate exceeded time bound, killed");
                Ok(ExecutionReport {
                    stdout: String::new(),
                    stderr: String::new(),
                    exit_code: None,
                    timed_out: true,
                })
            }
        }
    }
}
