//! JSON file store for the shared territory table.
//!
//! The table is read wholesale and written wholesale. The file is shared
//! through the replication layer and hand-inspected by operators, so writes
//! are pretty-printed.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::TerritoryTable;
use crate::domain::ports::TerritoryStore;

/// Territory store backed by a single JSON file.
#[derive(Debug, Clone, Default)]
pub struct JsonTerritoryStore;

impl JsonTerritoryStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TerritoryStore for JsonTerritoryStore {
    async fn load(&self, path: &Path) -> GameResult<TerritoryTable> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| GameError::Store {
                path: path.to_path_buf(),
                source,
            })?;

        let table: TerritoryTable =
            serde_json::from_str(&content).map_err(|source| GameError::CorruptStore {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), territories = table.len(), "Loaded territory table");
        Ok(table)
    }

    async fn save(&self, path: &Path, table: &TerritoryTable) -> GameResult<()> {
        // Serialization of the table cannot fail; map through CorruptStore
        // anyway rather than panic.
        let content =
            serde_json::to_string_pretty(table).map_err(|source| GameError::CorruptStore {
                path: path.to_path_buf(),
                source,
            })?;

        tokio::fs::write(path, content)
            .await
            .map_err(|source| GameError::Store {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), territories = table.len(), "Saved territory table");
        Ok(())
    }
}
