//! Ports: capability traits at the seams of the system.
//!
//! Adapters implement these; services depend only on the traits, so the
//! backing layout, execution backend, and replication transport can vary
//! without touching the capture protocol.

pub mod challenge_source;
pub mod replica;
pub mod sandbox;
pub mod territory_store;

pub use challenge_source::ChallengeSource;
pub use replica::Replica;
pub use sandbox::{ExecutionReport, Sandbox};
pub use territory_store::TerritoryStore;
