//! Implementation of the `hexclash attack` command.
//!
//! The full interactive flow: restore-or-create the session, pick a hex,
//! read the challenge, run the candidate solution, and report the outcome.
//! Losses, an already-owned hex, and detected conflicts all exit cleanly;
//! only infrastructure faults exit non-zero.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::{style, Term};

use crate::adapters::fs::{ChallengeBank, JsonTerritoryStore, SessionFile};
use crate::adapters::git::GitReplica;
use crate::adapters::process::ProcessSandbox;
use crate::cli::output::{output, CommandOutput};
use crate::cli::prompt;
use crate::domain::models::{Config, Difficulty, Faction};
use crate::services::capture::AttackPhase;
use crate::services::{CaptureOutcome, CaptureService, Judge, ProblemBank};

use super::login::ensure_session;

#[derive(Args, Debug)]
pub struct AttackArgs {
    /// Hex id to attack; prompted for when omitted
    pub id: Option<u32>,
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttackOutput {
    Captured {
        id: u32,
        recaptured: bool,
        new_owner: Faction,
        new_difficulty: Difficulty,
        challenge_id: String,
    },
    Defended {
        id: u32,
        challenge_id: String,
        expected: String,
        actual: String,
    },
    AlreadyOwned {
        id: u32,
        owner: Faction,
    },
    Conflict {
        id: u32,
    },
}

impl CommandOutput for AttackOutput {
    fn to_human(&self) -> String {
        match self {
            AttackOutput::Captured {
                id,
                recaptured,
                new_owner,
                new_difficulty,
                ..
            } => {
                let verb = if *recaptured { "RE-CAPTURED" } else { "CAPTURED" };
                format!(
                    "{} Hex {id} {verb}!\nNew owner: {new_owner}\nNew difficulty: {new_difficulty}",
                    style("PASS").green().bold()
                )
            }
            AttackOutput::Defended {
                expected, actual, ..
            } => format!(
                "{}\nExpected: {expected:?}\nGot     : {actual:?}",
                style("FAIL").red().bold()
            ),
            AttackOutput::AlreadyOwned { id, owner } => {
                format!("Hex {id} is already held by your faction ({owner}); nothing to do")
            }
            AttackOutput::Conflict { id } => format!(
                "{} Hex {id} changed hands while you were solving; state changed, retry",
                style("CONFLICT").yellow().bold()
            ),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl From<CaptureOutcome> for AttackOutput {
    fn from(outcome: CaptureOutcome) -> Self {
        match outcome {
            CaptureOutcome::Captured {
                id,
                previous_owner,
                new_owner,
                new_difficulty,
                challenge_id,
                ..
            } => AttackOutput::Captured {
                id,
                recaptured: previous_owner.is_some(),
                new_owner,
                new_difficulty,
                challenge_id,
            },
            CaptureOutcome::Defended {
                id,
                challenge_id,
                expected,
                actual,
            } => AttackOutput::Defended {
                id,
                challenge_id,
                expected,
                actual,
            },
            CaptureOutcome::AlreadyOwned { id, owner } => AttackOutput::AlreadyOwned { id, owner },
            CaptureOutcome::Conflict { id, .. } => AttackOutput::Conflict { id },
        }
    }
}

pub async fn execute(args: AttackArgs, config: &Config, json_mode: bool) -> Result<()> {
    let term = Term::stdout();
    if !json_mode {
        term.write_line("Hexclash Battle Client")?;
        term.write_line("----------------------")?;
    }

    let session_store = SessionFile::new(&config.session_path);
    let session = ensure_session(&session_store, &term, json_mode).await?;

    let territory_id = match args.id {
        Some(id) => id,
        None => {
            let raw = prompt(&term, "Enter Hex ID to attack")?;
            raw.parse::<u32>()
                .ok()
                .with_context(|| format!("hex id must be a number, got '{raw}'"))?
        }
    };

    let repo_dir = Path::new(&config.repo.dir);
    let table_path = repo_dir.join(&config.repo.territories_path);
    let bank_dir = repo_dir.join(&config.repo.challenges_dir);

    let service = CaptureService::new(
        Arc::new(JsonTerritoryStore::new()),
        Arc::new(GitReplica::new(repo_dir)),
        ProblemBank::new(Arc::new(ChallengeBank::new(bank_dir))),
        Judge::new(
            Arc::new(ProcessSandbox::new()),
            Duration::from_secs(config.judge.timeout_secs),
        ),
        table_path,
        // Staged relative to the repository root, not the working directory.
        &config.repo.territories_path,
        &config.judge.solution_path,
    );

    let staged = match service.begin(&session, territory_id).await? {
        AttackPhase::Settled(outcome) => {
            output(&AttackOutput::from(outcome), json_mode);
            return Ok(());
        }
        AttackPhase::Staged(staged) => staged,
    };

    if !json_mode {
        term.write_line("")?;
        term.write_line(&format!("Attacking Hex {territory_id}"))?;
        term.write_line(&format!(
            "Current owner: {}",
            staged
                .baseline_owner
                .map_or_else(|| "unclaimed".to_string(), |f| f.to_string())
        ))?;
        term.write_line(&format!("Difficulty: {}", staged.baseline_difficulty))?;
        term.write_line("")?;
        term.write_line(&format!(
            "Problem: {}",
            style(&staged.selected.challenge.title).bold()
        ))?;
        term.write_line(&staged.selected.challenge.description)?;
        term.write_line("")?;
        term.write_str("Press ENTER to run tests...")?;
        let _ = term.read_line()?;
    }

    let outcome = service.finish(&session, staged).await?;
    output(&AttackOutput::from(outcome), json_mode);
    Ok(())
}
