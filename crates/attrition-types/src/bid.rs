//! Opponent bid types exchanged with the oracle.

use serde::{Deserialize, Serialize};

/// A bid proposed by the opponent oracle, with its justification.
///
/// `bid` is signed because oracle output is untrusted: the engine clamps it
/// into `[0, money]` before use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BidSuggestion {
    pub bid: i64,
    /// Short human-readable reasons shown alongside the bid.
    pub notes: Vec<String>,
}

impl BidSuggestion {
    #[must_use]
    pub fn new(bid: i64, notes: Vec<String>) -> Self {
        Self { bid, notes }
    }

    /// A bid with no notes attached.
    #[must_use]
    pub fn bare(bid: i64) -> Self {
        Self {
            bid,
            notes: Vec::new(),
        }
    }
}

/// Maintenance fees of the next three rounds, used for planning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaintenanceOutlook {
    pub next_round: u64,
    pub in_2_rounds: u64,
    pub in_3_rounds: u64,
}
