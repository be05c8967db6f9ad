//! Implementation of the `hexclash login` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Term};

use crate::adapters::fs::SessionFile;
use crate::cli::output::{output, CommandOutput};
use crate::cli::prompt;
use crate::domain::models::{Config, Faction, Session};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Replace an existing session
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct LoginOutput {
    pub username: String,
    pub faction: Faction,
    pub created: bool,
}

impl CommandOutput for LoginOutput {
    fn to_human(&self) -> String {
        if self.created {
            format!(
                "{} Logged in as {} (Team {})",
                style("ok:").green().bold(),
                self.username,
                self.faction
            )
        } else {
            format!("Already logged in as {} (Team {})", self.username, self.faction)
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LoginArgs, config: &Config, json_mode: bool) -> Result<()> {
    let store = SessionFile::new(&config.session_path);

    if let Some(session) = store.load().await? {
        if !args.force {
            let out = LoginOutput {
                username: session.username,
                faction: session.faction,
                created: false,
            };
            output(&out, json_mode);
            return Ok(());
        }
    }

    let term = Term::stdout();
    let session = prompt_new_session(&term)?;
    store
        .save(&session)
        .await
        .context("Failed to persist session")?;

    let out = LoginOutput {
        username: session.username,
        faction: session.faction,
        created: true,
    };
    output(&out, json_mode);
    Ok(())
}

/// Interactive login: Discord-style username plus a team choice validated
/// against the two factions. Invalid input is a setup failure (exit 1).
pub fn prompt_new_session(term: &Term) -> Result<Session> {
    let username = prompt(term, "Discord username")?;
    if username.is_empty() {
        bail!("username cannot be empty");
    }

    let team = prompt(term, "Choose team (red/blue)")?;
    let faction: Faction = match team.parse() {
        Ok(faction) => faction,
        Err(reason) => bail!("invalid team: {reason}"),
    };

    Ok(Session::new(username, faction))
}

/// Restore the stored session, or walk through login when none exists yet.
pub async fn ensure_session(store: &SessionFile, term: &Term, json_mode: bool) -> Result<Session> {
    if let Some(session) = store.load().await? {
        if !json_mode {
            term.write_line(&format!(
                "Logged in as {} (Team {})",
                session.username, session.faction
            ))?;
        }
        return Ok(session);
    }

    let session = prompt_new_session(term)?;
    store
        .save(&session)
        .await
        .context("Failed to persist session")?;
    if !json_mode {
        term.write_line(&format!(
            "{} Logged in as {} (Team {})",
            style("ok:").green().bold(),
            session.username,
            session.faction
        ))?;
    }
    Ok(session)
}
