//! End-of-match summary handed to the report generator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Side;

/// A per-side pair of values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PerSide<T> {
    pub a: T,
    pub b: T,
}

impl<T: Copy> PerSide<T> {
    #[must_use]
    pub fn get(&self, side: Side) -> T {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

/// Round outcome counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WinCounts {
    pub a: usize,
    pub b: usize,
    pub ties: usize,
}

/// Bid statistics over the whole history, walkover rounds included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BidStats {
    pub avg: PerSide<Decimal>,
    pub max: PerSide<u64>,
    pub total: PerSide<u64>,
}

/// Condensed view of one round for the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundDigest {
    pub round: u32,
    pub bid_a: u64,
    pub bid_b: u64,
    pub winner: Option<Side>,
    pub maintenance_fee: u64,
    pub money_after: PerSide<u64>,
}

/// Plain aggregation over a finished (or in-progress) match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSummary {
    pub rounds: usize,
    pub scores: PerSide<u32>,
    pub money_final: PerSide<u64>,
    pub wins: WinCounts,
    pub bids: BidStats,
    /// Sum of the per-round fee as recorded in history.
    pub maintenance_total_paid: u64,
    pub history: Vec<RoundDigest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_side_get() {
        let p = PerSide { a: 3, b: 9 };
        assert_eq!(p.get(Side::A), 3);
        assert_eq!(p.get(Side::B), 9);
    }

    #[test]
    fn averages_serialize_as_strings() {
        let stats = BidStats {
            avg: PerSide {
                a: Decimal::new(125, 1),
                b: Decimal::ZERO,
            },
            ..BidStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["avg"]["a"], "12.5");
    }
}
