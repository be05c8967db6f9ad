//! Domain errors for the hexclash battle client.

use std::path::PathBuf;

use thiserror::Error;

use super::models::Difficulty;

/// Replication-layer failures, distinguished by cause.
///
/// Only [`SyncError::NonFastForward`] is worth retrying by the operator;
/// everything else is a genuine fatal condition. No automatic retry or merge
/// is attempted at this level.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("publish rejected: upstream moved (non-fast-forward); pull and retry the attack")]
    NonFastForward { stderr: String },

    #[error("authentication against the shared repository failed: {stderr}")]
    Auth { stderr: String },

    #[error("could not reach the shared repository: {stderr}")]
    Network { stderr: String },

    #[error("git {op} failed: {stderr}")]
    Command { op: String, stderr: String },

    #[error("failed to launch git ({op}): {source}")]
    Spawn {
        op: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// True when the operator can reasonably retry the whole attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::NonFastForward { .. })
    }
}

/// Domain-level errors that abort an attack attempt.
///
/// Game outcomes (a lost round, an already-owned hex, a detected conflict)
/// are not errors; they are reported as
/// [`CaptureOutcome`](crate::services::CaptureOutcome) values.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no challenge source exists for tier '{0}'")]
    NoChallengeTier(Difficulty),

    #[error("challenge tier '{0}' contains no challenges")]
    EmptyTier(Difficulty),

    #[error("challenge '{challenge_id}' in tier '{tier}' has no expected-result fixture")]
    MissingFixture {
        tier: Difficulty,
        challenge_id: String,
    },

    #[error("territory table at {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("territory {0} not found")]
    TerritoryNotFound(u32),

    #[error("solution runtime error: {0}")]
    SolutionRuntime(String),

    #[error("session file at {path} is invalid: {reason}")]
    Session { path: PathBuf, reason: String },

    #[error("sync failed: {0}")]
    Sync(#[from] SyncError),

    #[error("storage error at {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GameResult<T> = Result<T, GameError>;
