//! End-of-match aggregation.
//!
//! Pure fold over the history into a [`MatchSummary`] for the report
//! generator. Walkover rounds count as wins and contribute zero bids.

use attrition_types::{BidStats, MatchState, MatchSummary, PerSide, RoundDigest, Side, WinCounts};
use rust_decimal::Decimal;

/// Decimal places kept on average bids.
const AVG_DP: u32 = 2;

/// Summarise a match.
#[must_use]
pub fn summarize(state: &MatchState) -> MatchSummary {
    let history = &state.history;

    let wins_for = |side: Side| history.iter().filter(|r| r.winner == Some(side)).count();
    let wins_a = wins_for(Side::A);
    let wins_b = wins_for(Side::B);

    let total_a: u64 = history.iter().map(|r| r.bid_a).sum();
    let total_b: u64 = history.iter().map(|r| r.bid_b).sum();
    let max_a = history.iter().map(|r| r.bid_a).max().unwrap_or(0);
    let max_b = history.iter().map(|r| r.bid_b).max().unwrap_or(0);

    MatchSummary {
        rounds: history.len(),
        scores: PerSide {
            a: state.party_a.score,
            b: state.party_b.score,
        },
        money_final: PerSide {
            a: state.party_a.money,
            b: state.party_b.money,
        },
        wins: WinCounts {
            a: wins_a,
            b: wins_b,
            ties: history.len() - wins_a - wins_b,
        },
        bids: BidStats {
            avg: PerSide {
                a: average(total_a, history.len()),
                b: average(total_b, history.len()),
            },
            max: PerSide { a: max_a, b: max_b },
            total: PerSide {
                a: total_a,
                b: total_b,
            },
        },
        maintenance_total_paid: history.iter().map(|r| r.maintenance_fee).sum(),
        history: history
            .iter()
            .map(|r| RoundDigest {
                round: r.round,
                bid_a: r.bid_a,
                bid_b: r.bid_b,
                winner: r.winner,
                maintenance_fee: r.maintenance_fee,
                money_after: PerSide {
                    a: r.a.money_after_bid,
                    b: r.b.money_after_bid,
                },
            })
            .collect(),
    }
}

fn average(total: u64, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(total) / Decimal::from(count as u64)).round_dp(AVG_DP)
}

#[cfg(test)]
mod tests {
    use attrition_types::{BidSuggestion, FeeSchedule, MatchConfig};

    use super::*;
    use crate::RoundEngine;

    fn play(bids: &[(u64, i64)]) -> MatchState {
        let engine = RoundEngine::new(FeeSchedule::default()).unwrap();
        let mut state = MatchState::new(&MatchConfig::default());
        for &(a, b) in bids {
            engine
                .play_round_with_bid(&mut state, a, BidSuggestion::bare(b))
                .unwrap();
        }
        state
    }

    #[test]
    fn empty_history() {
        let summary = summarize(&MatchState::new(&MatchConfig::default()));
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.bids.avg.a, Decimal::ZERO);
        assert_eq!(summary.bids.max.b, 0);
        assert_eq!(summary.money_final.a, 100);
    }

    #[test]
    fn counts_and_totals() {
        // Round 1: A wins, round 2: tie, round 3 (fee 5): B wins.
        let state = play(&[(10, 5), (5, 5), (7, 20)]);
        let summary = summarize(&state);

        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.wins.a, 1);
        assert_eq!(summary.wins.b, 1);
        assert_eq!(summary.wins.ties, 1);
        assert_eq!(summary.bids.total.a, 22);
        assert_eq!(summary.bids.total.b, 30);
        assert_eq!(summary.bids.max.a, 10);
        assert_eq!(summary.bids.max.b, 20);
        assert_eq!(summary.bids.avg.a, Decimal::new(733, 2));
        assert_eq!(summary.bids.avg.b, Decimal::new(10, 0));
        assert_eq!(summary.maintenance_total_paid, 5);
        assert_eq!(summary.scores.get(Side::A), 1);
        assert_eq!(summary.money_final.a, 100 - 22 - 5);
    }

    #[test]
    fn digests_follow_history() {
        let state = play(&[(10, 5), (1, 2)]);
        let summary = summarize(&state);
        assert_eq!(summary.history.len(), 2);
        assert_eq!(summary.history[1].round, 2);
        assert_eq!(summary.history[1].winner, Some(Side::B));
        assert_eq!(summary.history[1].money_after.b, 93);
    }
}
