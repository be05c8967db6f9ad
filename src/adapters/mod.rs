//! Adapters: concrete implementations of the domain ports.

pub mod fs;
pub mod git;
pub mod process;

pub use fs::{ChallengeBank, JsonTerritoryStore, SessionFile};
pub use git::GitReplica;
pub use process::ProcessSandbox;
