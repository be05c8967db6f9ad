//! Domain models.

pub mod challenge;
pub mod config;
pub mod session;
pub mod territory;

pub use challenge::{Challenge, Fixture};
pub use config::{Config, JudgeConfig, RepoConfig};
pub use session::Session;
pub use territory::{Difficulty, Faction, Territory, TerritoryTable};
