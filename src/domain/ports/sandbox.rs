//! Sandbox port for running untrusted candidate solutions.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::GameResult;

/// Structured result of one sandboxed execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error, kept separate from stdout.
    pub stderr: String,
    /// Exit code, when the process terminated normally within the bound.
    pub exit_code: Option<i32>,
    /// Whether the wall-clock bound fired before the process exited.
    pub timed_out: bool,
}

/// Capability to execute an untrusted artifact in isolation.
///
/// The execution backend (native process, container, VM) can vary behind
/// this trait without touching the capture protocol. Implementations must
/// enforce the wall-clock bound; a candidate that never terminates yields a
/// report with `timed_out: true`, never a hung call.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Run the artifact with no arguments and no stdin, capturing stdout and
    /// stderr separately, bounded by `timeout`.
    ///
    /// Launcher faults (missing interpreter, permission error) are errors;
    /// the candidate's own exit code is reported, not judged here.
    async fn run(&self, artifact: &Path, timeout: Duration) -> GameResult<ExecutionReport>;
}
