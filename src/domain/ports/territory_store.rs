//! Territory table persistence port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::GameResult;
use crate::domain::models::TerritoryTable;

/// Load/save of the shared ownership table.
///
/// `save` is a full-file overwrite with no partial or append semantics;
/// callers must ensure only one logical writer proceeds per attempt (the
/// capture protocol's conflict check, not this component, enforces that).
#[async_trait]
pub trait TerritoryStore: Send + Sync {
    async fn load(&self, path: &Path) -> GameResult<TerritoryTable>;

    async fn save(&self, path: &Path, table: &TerritoryTable) -> GameResult<()>;
}
