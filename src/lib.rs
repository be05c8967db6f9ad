//! Hexclash - Territory-Capture Battle Client
//!
//! Hexclash lets competing factions capture hexes on a shared map by solving
//! programming challenges. Ownership lives in a single JSON table inside a
//! shared git repository; the repository acts as a makeshift replicated log,
//! and the capture protocol uses optimistic check-then-act concurrency across
//! unsynchronized clients.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, ports, and the error taxonomy
//! - **Service Layer** (`services`): Problem bank, judge, capture protocol
//! - **Adapter Layer** (`adapters`): Filesystem stores, git replication,
//!   process sandbox
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{GameError, GameResult, SyncError};
pub use domain::models::{
    Challenge, Config, Difficulty, Faction, Fixture, JudgeConfig, RepoConfig, Session, Territory,
    TerritoryTable,
};
pub use domain::ports::{ChallengeSource, ExecutionReport, Replica, Sandbox, TerritoryStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CaptureOutcome, CaptureService, Judge, ProblemBank, Verdict};
