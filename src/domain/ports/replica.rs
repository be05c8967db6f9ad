//! Replication transport port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::SyncError;

/// The shared replicated store, seen as three opaque operations.
///
/// `pull` must complete successfully before any read an attempt relies on;
/// `publish` stages, commits, and propagates as one unit, in strict order,
/// aborting on the first failing step. Conflict resolution at this level is
/// explicitly not handled.
#[async_trait]
pub trait Replica: Send + Sync {
    /// Bring the local copy up to date with the shared upstream.
    async fn pull(&self) -> Result<(), SyncError>;

    /// Stage the changed paths, commit with the audit message, and propagate
    /// to the shared upstream.
    async fn publish(&self, paths: &[&Path], message: &str) -> Result<(), SyncError>;
}
