//! Judging.
//!
//! Executes the candidate solution under a hard time bound and compares its
//! captured stdout against the challenge's expected output. A lost round is
//! a verdict, not an error; a candidate that cannot be scored at all (timed
//! out, unspawnable) is a runtime error that aborts the whole attempt.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::Fixture;
use crate::domain::ports::Sandbox;

/// Judging outcome. Distinct from a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Verdict plus the compared values, for operator-facing reporting.
#[derive(Debug, Clone)]
pub struct JudgeReport {
    pub verdict: Verdict,
    /// Expected output after trimming.
    pub expected: String,
    /// Actual candidate stdout after trimming.
    pub actual: String,
}

impl JudgeReport {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Runs candidates through a [`Sandbox`] and scores their output.
///
/// Never touches the territory table.
pub struct Judge {
    sandbox: Arc<dyn Sandbox>,
    timeout: Duration,
}

impl Judge {
    pub fn new(sandbox: Arc<dyn Sandbox>, timeout: Duration) -> Self {
        Self { sandbox, timeout }
    }

    /// Execute the candidate and compare its stdout against the fixture.
    ///
    /// Comparison is exact string equality after trimming only leading and
    /// trailing whitespace from both sides; internal whitespace, case, and
    /// line endings are significant.
    pub async fn run(&self, candidate: &Path, fixture: &Fixture) -> GameResult<JudgeReport> {
        let report = self.sandbox.run(candidate, self.timeout).await?;

        if report.timed_out {
            return Err(GameError::SolutionRuntime(format!(
                "candidate exceeded the {:?} time bound",
                self.timeout
            )));
        }

        let actual = report.stdout.trim().to_string();
        let expected = fixture.expected_output.trim().to_string();
        let verdict = if actual == expected {
            Verdict::Pass
        } else {
            Verdict::Fail
        };

        debug!(exit_code = ?report.exit_code, ?verdict, "Judged candidate output");
        info!(?verdict, "Judging complete");

        Ok(JudgeReport {
            verdict,
            expected,
            actual,
        })
    }
}
