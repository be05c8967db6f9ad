//! Challenge bank port.

use async_trait::async_trait;

use crate::domain::errors::GameResult;
use crate::domain::models::{Challenge, Difficulty, Fixture};

/// Source of challenges partitioned by difficulty tier.
#[async_trait]
pub trait ChallengeSource: Send + Sync {
    /// List the challenge ids available in a tier.
    ///
    /// Fails with [`GameError::NoChallengeTier`](crate::GameError) when no
    /// source exists for the tier at all; an existing-but-empty tier returns
    /// an empty list.
    async fn list_ids(&self, tier: Difficulty) -> GameResult<Vec<String>>;

    /// Load one challenge record by tier and id.
    async fn load(&self, tier: Difficulty, id: &str) -> GameResult<Challenge>;

    /// Load the expected-result fixture paired with a challenge.
    ///
    /// Fails with [`GameError::MissingFixture`](crate::GameError) when the
    /// challenge has no matching fixture record.
    async fn load_fixture(&self, tier: Difficulty, id: &str) -> GameResult<Fixture>;
}
