//! Per-party balance and score.

use serde::{Deserialize, Serialize};

/// One participant's standing within a match.
///
/// Money only ever goes down over a match and score only ever goes up, by
/// one point per round won.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Party {
    /// Display name (e.g. "PLAYER", "AI").
    pub name: String,
    /// Remaining money.
    pub money: u64,
    /// Rounds won so far.
    pub score: u32,
}

impl Party {
    /// Create a party with a fresh bankroll and no score.
    #[must_use]
    pub fn new(name: impl Into<String>, money: u64) -> Self {
        Self {
            name: name.into(),
            money,
            score: 0,
        }
    }

    /// Whether this party can pay `fee` out of its current money.
    #[must_use]
    pub fn can_afford(&self, fee: u64) -> bool {
        self.money >= fee
    }

    /// Whether the party has nothing left.
    #[must_use]
    pub fn is_broke(&self) -> bool {
        self.money == 0
    }
}
