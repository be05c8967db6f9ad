//! The capture protocol.
//!
//! Orchestrates one attack attempt as a strict sequence of states:
//!
//! ```text
//! SYNCING -> SNAPSHOT_A -> JUDGING -> SNAPSHOT_B -> MUTATING -> PUBLISHING -> DONE
//! ```
//!
//! with `ABORTED` reachable from every non-terminal state. No lock is held
//! between the first snapshot and the commit; the only mutual-exclusion
//! mechanism is the re-read before mutation, which compares the territory's
//! owner against the baseline captured before judging. A true race between
//! the re-read and the publish remains possible and is accepted given the
//! human pace of the game; a concurrent publish then surfaces as a rejected
//! push at the replication layer.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::{Difficulty, Faction, Session, TerritoryTable};
use crate::domain::ports::{Replica, TerritoryStore};

use super::judge::Judge;
use super::problem_bank::{ProblemBank, SelectedChallenge};

/// Terminal result of one attack attempt that is a game outcome rather than
/// an error. Everything here exits the process cleanly.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// The judge passed the candidate and the capture was published.
    Captured {
        id: u32,
        previous_owner: Option<Faction>,
        new_owner: Faction,
        previous_difficulty: Difficulty,
        new_difficulty: Difficulty,
        challenge_id: String,
    },
    /// The judge failed the candidate. A loss, not an error; nothing written.
    Defended {
        id: u32,
        challenge_id: String,
        expected: String,
        actual: String,
    },
    /// The territory already belongs to the acting faction. Judging is never
    /// invoked and the table is never touched.
    AlreadyOwned { id: u32, owner: Faction },
    /// Another actor completed a capture between snapshot and re-check.
    /// Abandoned without writing; retryable by the operator.
    Conflict {
        id: u32,
        baseline_owner: Option<Faction>,
        observed_owner: Option<Faction>,
    },
}

impl CaptureOutcome {
    /// True for the one outcome that mutated shared state.
    pub fn is_capture(&self) -> bool {
        matches!(self, CaptureOutcome::Captured { .. })
    }
}

/// Orchestrates attack attempts against the shared territory table.
pub struct CaptureService {
    store: Arc<dyn TerritoryStore>,
    replica: Arc<dyn Replica>,
    bank: ProblemBank,
    judge: Judge,
    /// Table location for the store, resolved against the working directory.
    table_path: PathBuf,
    /// Table location for publishing, relative to the replica's repository
    /// root. The replica stages pathspecs against the repository, not the
    /// working directory, so the two differ whenever the repository is not
    /// the working directory itself.
    publish_path: PathBuf,
    solution_path: PathBuf,
}

impl CaptureService {
    pub fn new(
        store: Arc<dyn TerritoryStore>,
        replica: Arc<dyn Replica>,
        bank: ProblemBank,
        judge: Judge,
        table_path: impl Into<PathBuf>,
        publish_path: impl Into<PathBuf>,
        solution_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            replica,
            bank,
            judge,
            table_path: table_path.into(),
            publish_path: publish_path.into(),
            solution_path: solution_path.into(),
        }
    }

    /// The selected challenge of the last phase, surfaced for display.
    ///
    /// The interactive flow wants to show the challenge before judging, so
    /// the attempt is split: [`Self::begin`] runs SYNCING through challenge
    /// selection, [`Self::finish`] runs JUDGING through DONE.
    #[instrument(skip(self, session), fields(username = %session.username, faction = %session.faction))]
    pub async fn begin(&self, session: &Session, territory_id: u32) -> GameResult<AttackPhase> {
        // SYNCING: no attack may proceed against a stale local copy.
        self.replica.pull().await?;

        // SNAPSHOT_A
        let table = self.store.load(&self.table_path).await?;
        let Some(territory) = table.find(territory_id) else {
            return Err(GameError::TerritoryNotFound(territory_id));
        };

        if territory.owner == Some(session.faction) {
            info!(territory_id, "Territory already held by acting faction, nothing to do");
            return Ok(AttackPhase::Settled(CaptureOutcome::AlreadyOwned {
                id: territory_id,
                owner: session.faction,
            }));
        }

        // Baseline for the optimistic conflict check; no lock from here on.
        let baseline_owner = territory.owner;
        let baseline_difficulty = territory.difficulty;

        let selected = self.bank.select(baseline_difficulty).await?;
        info!(
            territory_id,
            challenge_id = %selected.challenge.id,
            difficulty = %baseline_difficulty,
            "Attack staged"
        );

        Ok(AttackPhase::Staged(StagedAttack {
            territory_id,
            baseline_owner,
            baseline_difficulty,
            table,
            selected,
        }))
    }

    /// JUDGING through DONE for a staged attack.
    #[instrument(skip(self, session, staged), fields(username = %session.username, faction = %session.faction, territory_id = staged.territory_id))]
    pub async fn finish(
        &self,
        session: &Session,
        mut staged: StagedAttack,
    ) -> GameResult<CaptureOutcome> {
        // JUDGING: a runtime error aborts the attempt and is never scored as
        // a loss against the territory.
        let report = self
            .judge
            .run(&self.solution_path, &staged.selected.fixture)
            .await?;

        if !report.passed() {
            return Ok(CaptureOutcome::Defended {
                id: staged.territory_id,
                challenge_id: staged.selected.challenge.id,
                expected: report.expected,
                actual: report.actual,
            });
        }

        // SNAPSHOT_B: reload fresh and compare owner against the baseline.
        // This detects interleaving writes; it does not prevent them.
        let fresh = self.store.load(&self.table_path).await?;
        let observed_owner = match fresh.find(staged.territory_id) {
            Some(territory) => territory.owner,
            // The record vanished under us: some other actor rewrote the
            // table. Same abort-without-write as an owner change.
            None => {
                warn!(
                    territory_id = staged.territory_id,
                    "Territory missing on re-read, treating as conflict"
                );
                return Ok(CaptureOutcome::Conflict {
                    id: staged.territory_id,
                    baseline_owner: staged.baseline_owner,
                    observed_owner: None,
                });
            }
        };
        if observed_owner != staged.baseline_owner {
            info!(
                territory_id = staged.territory_id,
                ?observed_owner,
                baseline_owner = ?staged.baseline_owner,
                "Owner changed since snapshot, abandoning attempt"
            );
            return Ok(CaptureOutcome::Conflict {
                id: staged.territory_id,
                baseline_owner: staged.baseline_owner,
                observed_owner,
            });
        }

        // MUTATING: on the table loaded at SNAPSHOT_A, not the re-read.
        let pristine = staged.table.clone();
        let new_difficulty = staged.baseline_difficulty.advance();
        {
            let territory = staged
                .table
                .find_mut(staged.territory_id)
                .ok_or(GameError::TerritoryNotFound(staged.territory_id))?;
            territory.owner = Some(session.faction);
            territory.difficulty = new_difficulty;
        }

        // PUBLISHING: persist, then stage+commit+push as one unit.
        self.store.save(&self.table_path, &staged.table).await?;

        let message = audit_message(
            staged.territory_id,
            session,
            staged.baseline_difficulty,
            new_difficulty,
            &staged.selected.challenge.id,
        );
        if let Err(sync_err) = self
            .replica
            .publish(&[self.publish_path.as_path()], &message)
            .await
        {
            // Compensating rollback: the local table must not drift from the
            // shared upstream after a failed publish. The publish error still
            // wins even if the rollback itself fails.
            if let Err(rollback_err) = self.store.save(&self.table_path, &pristine).await {
                warn!(
                    error = %rollback_err,
                    "Rollback after failed publish also failed; local table needs manual reconciliation"
                );
            } else {
                info!("Local table rolled back after failed publish");
            }
            return Err(GameError::Sync(sync_err));
        }

        // DONE: report exactly the values that were written.
        let written = staged
            .table
            .find(staged.territory_id)
            .ok_or(GameError::TerritoryNotFound(staged.territory_id))?;
        info!(
            territory_id = staged.territory_id,
            new_owner = %session.faction,
            new_difficulty = %written.difficulty,
            "Capture published"
        );
        Ok(CaptureOutcome::Captured {
            id: staged.territory_id,
            previous_owner: staged.baseline_owner,
            new_owner: session.faction,
            previous_difficulty: staged.baseline_difficulty,
            new_difficulty: written.difficulty,
            challenge_id: staged.selected.challenge.id,
        })
    }

    /// Run a whole attempt end to end without the interactive pause.
    pub async fn attack(&self, session: &Session, territory_id: u32) -> GameResult<CaptureOutcome> {
        match self.begin(session, territory_id).await? {
            AttackPhase::Settled(outcome) => Ok(outcome),
            AttackPhase::Staged(staged) => self.finish(session, staged).await,
        }
    }
}

/// Result of the first half of an attempt: settled early, or staged and
/// awaiting judging.
pub enum AttackPhase {
    Settled(CaptureOutcome),
    Staged(StagedAttack),
}

/// Everything captured before judging: the SNAPSHOT_A table, the baseline,
/// and the selected challenge.
pub struct StagedAttack {
    pub territory_id: u32,
    pub baseline_owner: Option<Faction>,
    pub baseline_difficulty: Difficulty,
    table: TerritoryTable,
    pub selected: SelectedChallenge,
}

/// Human- and machine-readable audit record for the publish commit.
///
/// Embeds the territory id, acting username and faction, the difficulty
/// transition, and the challenge id.
pub fn audit_message(
    territory_id: u32,
    session: &Session,
    from: Difficulty,
    to: Difficulty,
    challenge_id: &str,
) -> String {
    format!(
        "capture: hex {territory_id} by {username} ({faction}) {from}->{to} challenge={challenge_id}",
        username = session.username,
        faction = session.faction,
    )
}
