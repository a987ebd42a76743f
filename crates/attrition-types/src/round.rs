//! Round records: the append-only history of a match.
//!
//! A [`RoundRecord`] is created exactly once per consumed round and is never
//! mutated afterwards. Money is captured at three checkpoints so the full
//! flow of a round (maintenance, then bid payment) can be replayed.

use serde::{Deserialize, Serialize};

use crate::Side;

/// How a round was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    /// Both parties paid maintenance and submitted bids.
    Contested,
    /// The opponent was bankrupt; the solvent party scored by default.
    Walkover,
}

/// One party's figures for a single round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Checkpoints {
    /// Score after the round.
    pub score: u32,
    /// Money before maintenance was deducted.
    pub money_before_maintenance: u64,
    /// Money after maintenance, before the bid was paid.
    pub money_before_bid: u64,
    /// Money after the bid was paid.
    pub money_after_bid: u64,
}

impl Checkpoints {
    /// Total money this party lost during the round.
    #[must_use]
    pub fn spent(&self) -> u64 {
        self.money_before_maintenance
            .saturating_sub(self.money_after_bid)
    }
}

/// Immutable snapshot of one resolved round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    /// Contested or walkover.
    pub kind: RoundKind,
    /// Party A's (clamped) bid.
    pub bid_a: u64,
    /// Party B's (clamped) bid.
    pub bid_b: u64,
    /// Winner of the round, `None` on a tie.
    pub winner: Option<Side>,
    /// Maintenance fee charged this round.
    pub maintenance_fee: u64,
    /// Party A's checkpoints.
    pub a: Checkpoints,
    /// Party B's checkpoints.
    pub b: Checkpoints,
}

impl RoundRecord {
    /// The bid recorded for `side`.
    #[must_use]
    pub fn bid(&self, side: Side) -> u64 {
        match side {
            Side::A => self.bid_a,
            Side::B => self.bid_b,
        }
    }

    /// The checkpoints recorded for `side`.
    #[must_use]
    pub fn checkpoints(&self, side: Side) -> &Checkpoints {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Returns `true` if the round ended without a point awarded.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

impl std::fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let winner = self.winner.map_or_else(|| "tie".to_string(), |s| s.to_string());
        write!(
            f,
            "Round[{}] fee={} bids {}/{} -> {} ({:?})",
            self.round, self.maintenance_fee, self.bid_a, self.bid_b, winner, self.kind,
        )
    }
}
