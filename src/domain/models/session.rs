//! Local login session.
//!
//! Created once per client installation via the interactive login flow,
//! persisted to a local JSON file, and immutable thereafter within a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::territory::Faction;

/// A player's local identity: who they are and which faction they fight for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Discord-style username.
    pub username: String,

    /// The faction this client fights for. Immutable after login.
    pub faction: Faction,

    /// When the session was first created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session for the given player.
    pub fn new(username: impl Into<String>, faction: Faction) -> Self {
        Self {
            username: username.into(),
            faction,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new("alice", Faction::Red);
        assert_eq!(session.username, "alice");
        assert_eq!(session.faction, Faction::Red);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = Session::new("bob", Faction::Blue);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert!(json.contains("\"blue\""));
    }
}
