//! Challenge selection.
//!
//! Resolves a difficulty tier to one randomly selected challenge and its
//! expected-output fixture. Selection among candidates is uniform-random for
//! replay variety; the RNG is injected so tests can seed it.

use std::sync::Arc;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::errors::{GameError, GameResult};
use crate::domain::models::{Challenge, Difficulty, Fixture};
use crate::domain::ports::ChallengeSource;

/// One selected challenge together with its judging fixture.
#[derive(Debug, Clone)]
pub struct SelectedChallenge {
    pub challenge: Challenge,
    pub fixture: Fixture,
}

/// Uniform-random challenge picker over a [`ChallengeSource`].
pub struct ProblemBank {
    source: Arc<dyn ChallengeSource>,
    rng: Mutex<StdRng>,
}

impl ProblemBank {
    /// Bank with an OS-entropy-seeded RNG.
    pub fn new(source: Arc<dyn ChallengeSource>) -> Self {
        Self {
            source,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Bank with a fixed seed, for reproducible tests.
    pub fn with_seed(source: Arc<dyn ChallengeSource>, seed: u64) -> Self {
        Self {
            source,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Select one challenge from the tier, uniformly at random.
    pub async fn select(&self, tier: Difficulty) -> GameResult<SelectedChallenge> {
        let ids = self.source.list_ids(tier).await?;
        if ids.is_empty() {
            return Err(GameError::EmptyTier(tier));
        }

        let pick = {
            let mut rng = self.rng.lock().expect("rng mutex poisoned");
            rng.gen_range(0..ids.len())
        };
        let id = &ids[pick];
        debug!(tier = %tier, challenge_id = %id, candidates = ids.len(), "Selected challenge");

        let challenge = self.source.load(tier, id).await?;
        let fixture = self.source.load_fixture(tier, id).await?;
        Ok(SelectedChallenge { challenge, fixture })
    }
}
