//! Local session file.
//!
//! A single session record, local to the client install: created on first
//! run by the login flow, read thereafter.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::Session;

/// Session persistence at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored session, or `None` when no session exists yet.
    pub async fn load(&self) -> GameResult<Option<Session>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(GameError::Store {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let session = serde_json::from_str(&content).map_err(|err| GameError::Session {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;
        debug!(path = %self.path.display(), "Restored session");
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> GameResult<()> {
        let content =
            serde_json::to_string_pretty(session).map_err(|err| GameError::Session {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| GameError::Store {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }
}
