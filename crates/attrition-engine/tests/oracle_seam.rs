//! Tests for the asynchronous opponent-oracle boundary.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use attrition_engine::{BidOracle, RoundEngine};
use attrition_types::*;

/// Returns a fixed bid and remembers what it was shown.
struct FixedOracle {
    bid: i64,
    calls: AtomicUsize,
    seen: Mutex<Vec<(u32, u64, u64, Side)>>,
}

impl FixedOracle {
    fn new(bid: i64) -> Self {
        Self {
            bid,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl BidOracle for FixedOracle {
    async fn suggest_bid(&self, state: &MatchState, acting: Side) -> Result<BidSuggestion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((
            state.current_round,
            state.party_a.money,
            state.party_b.money,
            acting,
        ));
        tokio::task::yield_now().await;
        Ok(BidSuggestion::new(self.bid, vec!["fixed".into()]))
    }
}

/// Always fails.
struct DownOracle;

impl BidOracle for DownOracle {
    async fn suggest_bid(&self, _state: &MatchState, _acting: Side) -> Result<BidSuggestion> {
        Err(AttritionError::Internal("upstream timed out".into()))
    }
}

fn engine() -> RoundEngine {
    RoundEngine::new(FeeSchedule::default()).unwrap()
}

/// Advance a fresh match to round 3 (first paid round) with 90/90 left.
fn at_round_three(engine: &RoundEngine) -> MatchState {
    let mut state = MatchState::new(&MatchConfig::default());
    engine
        .play_round_with_bid(&mut state, 5, BidSuggestion::bare(5))
        .unwrap();
    engine
        .play_round_with_bid(&mut state, 5, BidSuggestion::bare(5))
        .unwrap();
    state
}

#[tokio::test]
async fn oracle_sees_post_maintenance_view() {
    let engine = engine();
    let mut state = at_round_three(&engine);
    let oracle = FixedOracle::new(12);

    let outcome = engine.play_round(&mut state, 10, None, &oracle).await.unwrap();

    let seen = oracle.seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(3, 85, 85, Side::B)]);
    assert_eq!(outcome.opponent_notes, vec!["fixed".to_string()]);
    let rec = outcome.round.unwrap();
    assert_eq!(rec.bid_b, 12);
    assert_eq!(rec.winner, Some(Side::B));
    assert_eq!(state.party_b.money, 73);
}

#[tokio::test]
async fn pending_bid_skips_oracle() {
    let engine = engine();
    let mut state = MatchState::new(&MatchConfig::default());
    let oracle = FixedOracle::new(50);

    let pending = BidSuggestion::new(4, vec!["precomputed".into()]);
    let outcome = engine
        .play_round(&mut state, 3, Some(pending), &oracle)
        .await
        .unwrap();

    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.round.unwrap().bid_b, 4);
    assert_eq!(outcome.opponent_notes, vec!["precomputed".to_string()]);
}

#[tokio::test]
async fn oracle_overshoot_is_clamped() {
    let engine = engine();
    let mut state = at_round_three(&engine);
    let oracle = FixedOracle::new(10_000);

    engine.play_round(&mut state, 0, None, &oracle).await.unwrap();

    assert_eq!(state.history[2].bid_b, 85);
    assert_eq!(state.party_b.money, 0);
    assert!(state.is_finished());
}

#[tokio::test]
async fn oracle_failure_fails_round_without_mutation() {
    let engine = engine();
    let mut state = at_round_three(&engine);
    let snapshot = state.clone();

    let err = engine
        .play_round(&mut state, 10, None, &DownOracle)
        .await
        .unwrap_err();

    assert!(matches!(err, AttritionError::OracleFailed { .. }));
    assert!(format!("{err}").contains("upstream timed out"));
    assert_eq!(state, snapshot, "no maintenance or bid may leak");
}

#[tokio::test]
async fn oracle_not_consulted_when_round_uncontested() {
    let engine = engine();
    let mut state = MatchState::new(&MatchConfig::default());
    engine
        .play_round_with_bid(&mut state, 80, BidSuggestion::bare(97))
        .unwrap();
    engine
        .play_round_with_bid(&mut state, 0, BidSuggestion::bare(0))
        .unwrap();

    // B holds 3 at round 3: the cascade needs no bids.
    let outcome = engine
        .play_round(&mut state, 10, None, &DownOracle)
        .await
        .unwrap();
    assert_eq!(
        outcome.status,
        OutcomeStatus::Ended(EndReason::Insolvent(Side::B))
    );
}

#[tokio::test]
async fn prediction_uses_snapshot() {
    let engine = engine();
    let state = at_round_three(&engine);
    let oracle = FixedOracle::new(9);

    let predicted = engine
        .predict_opponent_bid(&state, &oracle)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(predicted.bid, 9);
    assert_eq!(state.party_b.money, 90, "prediction must not charge fees");
    assert_eq!(oracle.seen.lock().unwrap()[0], (3, 85, 85, Side::B));
}

#[tokio::test]
async fn prediction_none_for_finished_match() {
    let engine = engine();
    let mut state = MatchState::new(&MatchConfig::default());
    engine
        .play_round_with_bid(&mut state, 100, BidSuggestion::bare(100))
        .unwrap();

    let predicted = engine
        .predict_opponent_bid(&state, &DownOracle)
        .await
        .unwrap();
    assert!(predicted.is_none());
}

#[tokio::test]
async fn prediction_failure_is_oracle_error() {
    let engine = engine();
    let state = MatchState::new(&MatchConfig::default());
    let err = engine
        .predict_opponent_bid(&state, &DownOracle)
        .await
        .unwrap_err();
    assert!(matches!(err, AttritionError::OracleFailed { .. }));
}
