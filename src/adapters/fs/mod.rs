//! Filesystem adapters: territory table file, challenge bank, session file.

pub mod challenge_bank;
pub mod session_file;
pub mod territory_file;

pub use challenge_bank::ChallengeBank;
pub use session_file::SessionFile;
pub use territory_file::JsonTerritoryStore;
