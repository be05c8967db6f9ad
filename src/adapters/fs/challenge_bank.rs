//! Directory-per-tier challenge bank.
//!
//! Layout under the bank root:
//!
//! ```text
//! challenges/
//!   easy/
//!     hello_world.json           {"id","title","description"}
//!     hello_world.expected.json  {"expected_output"}
//!   medium/
//!   hard/
//! ```
//!
//! A challenge and its fixture are keyed by the same id.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::{Challenge, Difficulty, Fixture};
use crate::domain::ports::ChallengeSource;

const FIXTURE_SUFFIX: &str = ".expected.json";

/// Filesystem-backed challenge source.
#[derive(Debug, Clone)]
pub struct ChallengeBank {
    root: PathBuf,
}

impl ChallengeBank {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn tier_dir(&self, tier: Difficulty) -> PathBuf {
        self.root.join(tier.as_str())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &Path,
    ) -> GameResult<Option<T>> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(GameError::Store {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let value = serde_json::from_str(&content).map_err(|source| GameError::CorruptStore {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(value))
    }
}

#[async_trait]
impl ChallengeSource for ChallengeBank {
    async fn list_ids(&self, tier: Difficulty) -> GameResult<Vec<String>> {
        let dir = self.tier_dir(tier);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GameError::NoChallengeTier(tier));
            }
            Err(source) => {
                return Err(GameError::Store { path: dir, source });
            }
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| GameError::Store {
            path: dir.clone(),
            source,
        })? {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Fixture records are not challenges themselves.
            if name.ends_with(FIXTURE_SUFFIX) {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }

        // Directory order is platform-dependent; keep listings stable.
        ids.sort();
        debug!(tier = %tier, count = ids.len(), "Listed challenge tier");
        Ok(ids)
    }

    async fn load(&self, tier: Difficulty, id: &str) -> GameResult<Challenge> {
        let path = self.tier_dir(tier).join(format!("{id}.json"));
        self.read_json::<Challenge>(&path).await?.ok_or_else(|| {
            // Listed a moment ago but gone now; surface as a storage fault.
            GameError::Store {
                path,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "challenge record missing",
                ),
            }
        })
    }

    async fn load_fixture(&self, tier: Difficulty, id: &str) -> GameResult<Fixture> {
        let path = self.tier_dir(tier).join(format!("{id}{FIXTURE_SUFFIX}"));
        self.read_json::<Fixture>(&path)
            .await?
            .ok_or_else(|| GameError::MissingFixture {
                tier,
                challenge_id: id.to_string(),
            })
    }
}
