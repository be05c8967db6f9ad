//! Territory map models: factions, difficulty tiers, hexes, and the shared
//! ownership table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of exactly two mutually exclusive allegiances a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Red,
    Blue,
}

impl Faction {
    /// All factions, in declaration order.
    pub const ALL: [Faction; 2] = [Faction::Red, Faction::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Red => "red",
            Faction::Blue => "blue",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Faction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Faction::Red),
            "blue" => Ok(Faction::Blue),
            other => Err(format!("unknown team '{other}' (expected red or blue)")),
        }
    }
}

/// Ordered rank controlling challenge selection.
///
/// Advances by one tier on successful capture, saturating at the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const MAX: Difficulty = Difficulty::Hard;

    /// Next tier up, saturating at [`Difficulty::MAX`]. Never wraps, never
    /// decreases.
    pub fn advance(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A map cell identified by an integer id, owned by at most one faction.
///
/// The axial coordinates `q`/`r` are read by the map renderer and carried
/// through serialization untouched; the client never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: u32,
    #[serde(default)]
    pub owner: Option<Faction>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub q: i32,
    #[serde(default)]
    pub r: i32,
}

/// The shared ownership table: an ordered collection of territories.
///
/// This is the sole shared mutable state of the whole game. It is read
/// wholesale and written wholesale; the only mutual-exclusion mechanism is
/// the capture protocol's read-after-judge owner comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryTable {
    pub territories: Vec<Territory>,
}

impl TerritoryTable {
    pub fn new(territories: Vec<Territory>) -> Self {
        Self { territories }
    }

    pub fn find(&self, id: u32) -> Option<&Territory> {
        self.territories.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Territory> {
        self.territories.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}
