//! Programming challenges and their expected-output fixtures.
//!
//! Challenges are immutable reference data, loaded fresh per attack from a
//! bank partitioned by difficulty tier.

use serde::{Deserialize, Serialize};

/// A programming problem presented to the attacker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// The expected-result record paired with a challenge.
///
/// Judging compares the candidate's stdout against `expected_output` with
/// trim-only equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub expected_output: String,
}
