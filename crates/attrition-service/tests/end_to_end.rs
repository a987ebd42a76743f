//! Service-level flows: validation, pending bids, persistence, reports.

use std::sync::atomic::{AtomicBool, Ordering};

use attrition_engine::{BidOracle, RoundEngine, check_invariants};
use attrition_service::{
    GameService, GuardrailOracle, JsonFileStore, MatchStore, MemoryStore, ProfileReportGenerator,
    ReportGenerator,
};
use attrition_types::*;

struct FixedOracle {
    bid: i64,
}

impl FixedOracle {
    fn new(bid: i64) -> Self {
        Self { bid }
    }
}

impl BidOracle for FixedOracle {
    async fn suggest_bid(&self, _state: &MatchState, _acting: Side) -> Result<BidSuggestion> {
        Ok(BidSuggestion::new(self.bid, vec!["fixed".into()]))
    }
}

struct DownOracle;

impl BidOracle for DownOracle {
    async fn suggest_bid(&self, _state: &MatchState, _acting: Side) -> Result<BidSuggestion> {
        Err(AttritionError::Internal("model unavailable".into()))
    }
}

/// Bids ten times the round number, so a replayed bid is easy to spot.
struct RoundOracle;

impl BidOracle for RoundOracle {
    async fn suggest_bid(&self, state: &MatchState, _acting: Side) -> Result<BidSuggestion> {
        Ok(BidSuggestion::bare(i64::from(state.current_round) * 10))
    }
}

/// Memory store whose next commit can be made to fail.
struct FlakyStore {
    inner: MemoryStore,
    fail_next_commit: AtomicBool,
}

impl MatchStore for FlakyStore {
    async fn load(&self) -> Result<MatchState> {
        self.inner.load().await
    }

    async fn save(&self, state: &MatchState) -> Result<()> {
        self.inner.save(state).await
    }

    async fn pending(&self) -> Result<Option<BidSuggestion>> {
        self.inner.pending().await
    }

    async fn set_pending(&self, pending: Option<BidSuggestion>) -> Result<()> {
        self.inner.set_pending(pending).await
    }

    async fn commit(&self, state: &MatchState, pending: Option<BidSuggestion>) -> Result<()> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(AttritionError::Storage {
                reason: "disk full".into(),
            });
        }
        self.inner.commit(state, pending).await
    }

    async fn reset(&self) -> Result<MatchState> {
        self.inner.reset().await
    }
}

struct DownReporter;

impl ReportGenerator for DownReporter {
    async fn generate_report(&self, _summary: &MatchSummary) -> Result<String> {
        Err(AttritionError::ReportFailed {
            reason: "quota exhausted".into(),
        })
    }
}

fn engine() -> RoundEngine {
    RoundEngine::new(FeeSchedule::default()).unwrap()
}

fn service<O: BidOracle, R: ReportGenerator>(
    oracle: O,
    reporter: R,
) -> GameService<MemoryStore, O, R> {
    GameService::new(
        engine(),
        MemoryStore::new(MatchConfig::default()),
        oracle,
        reporter,
    )
}

#[tokio::test]
async fn start_precomputes_opponent_bid() {
    let svc = service(FixedOracle::new(7), ProfileReportGenerator);
    let state = svc.start().await.unwrap();
    assert_eq!(state.current_round, 1);
    assert_eq!(svc.store().pending().await.unwrap().unwrap().bid, 7);

    let resp = svc.submit_bid("5").await.unwrap();
    assert_eq!(resp.outcome.round.as_ref().unwrap().bid_b, 7);
    assert_eq!(resp.state.party_b.score, 1);
    assert!(resp.report.is_none());
    assert_eq!(svc.store().pending().await.unwrap().unwrap().bid, 7);
}

#[tokio::test]
async fn invalid_bid_touches_nothing() {
    let svc = service(FixedOracle::new(7), ProfileReportGenerator);
    let before = svc.start().await.unwrap();

    let err = svc.submit_bid("101").await.unwrap_err();
    assert!(matches!(err, AttritionError::InvalidBid { max: 100, .. }));
    assert!(svc.submit_bid("-3").await.is_err());
    assert!(svc.submit_bid("lots").await.is_err());

    assert_eq!(svc.state().await.unwrap(), before);
}

#[tokio::test]
async fn oracle_failure_persists_nothing() {
    let svc = service(DownOracle, ProfileReportGenerator);
    let before = svc.start().await.unwrap();
    assert!(svc.store().pending().await.unwrap().is_none());

    let err = svc.submit_bid("10").await.unwrap_err();
    assert!(matches!(err, AttritionError::OracleFailed { .. }));
    assert_eq!(svc.state().await.unwrap(), before);
}

#[tokio::test]
async fn all_in_tie_ends_with_report() {
    let svc = service(FixedOracle::new(100), ProfileReportGenerator);
    svc.start().await.unwrap();

    let resp = svc.submit_bid("100").await.unwrap();
    assert_eq!(
        resp.outcome.status,
        OutcomeStatus::Ended(EndReason::BothDepleted)
    );
    assert_eq!(resp.outcome.message.as_deref(), Some("Both players hit $0."));
    let report = resp.report.unwrap();
    assert!(report.starts_with("Your Capital Profile:"));
    assert!(resp.report_error.is_none());
    assert!(svc.store().pending().await.unwrap().is_none());

    let err = svc.submit_bid("0").await.unwrap_err();
    assert!(matches!(err, AttritionError::MatchFinished { .. }));
}

#[tokio::test]
async fn report_failure_still_commits_round() {
    let svc = service(FixedOracle::new(100), DownReporter);
    svc.start().await.unwrap();

    let resp = svc.submit_bid("100").await.unwrap();
    assert!(resp.outcome.is_ended());
    assert!(resp.report.is_none());
    assert!(resp.report_error.unwrap().contains("quota exhausted"));
    assert!(svc.state().await.unwrap().is_finished());
}

#[tokio::test]
async fn failed_persist_keeps_round_and_pending_bid() {
    let svc = GameService::new(
        engine(),
        FlakyStore {
            inner: MemoryStore::new(MatchConfig::default()),
            fail_next_commit: AtomicBool::new(false),
        },
        RoundOracle,
        ProfileReportGenerator,
    );
    svc.start().await.unwrap();
    assert_eq!(svc.store().pending().await.unwrap().unwrap().bid, 10);

    svc.store().fail_next_commit.store(true, Ordering::SeqCst);
    let err = svc.submit_bid("1").await.unwrap_err();
    assert!(matches!(err, AttritionError::Storage { .. }));

    let state = svc.state().await.unwrap();
    assert_eq!(state.current_round, 1);
    assert!(state.history.is_empty());
    assert_eq!(svc.store().pending().await.unwrap().unwrap().bid, 10);

    // Retrying replays round 1 with its own pending bid.
    let resp = svc.submit_bid("1").await.unwrap();
    let rec = resp.outcome.round.unwrap();
    assert_eq!((rec.round, rec.bid_b), (1, 10));
    assert_eq!(svc.store().pending().await.unwrap().unwrap().bid, 20);

    // Round 2 uses the bid computed for round 2, not the stale one.
    let resp = svc.submit_bid("1").await.unwrap();
    let rec = resp.outcome.round.unwrap();
    assert_eq!((rec.round, rec.bid_b), (2, 20));
}

#[tokio::test]
async fn restart_gives_fresh_match() {
    let svc = service(FixedOracle::new(100), ProfileReportGenerator);
    svc.start().await.unwrap();
    svc.submit_bid("100").await.unwrap();

    let fresh = svc.restart().await.unwrap();
    assert_eq!(fresh.current_round, 1);
    assert_eq!(fresh.party_a.money, 100);
    assert!(!fresh.is_finished());
    assert!(svc.store().pending().await.unwrap().is_none());
}

#[tokio::test]
async fn response_serializes_for_clients() {
    let svc = service(FixedOracle::new(3), ProfileReportGenerator);
    svc.start().await.unwrap();
    let resp = svc.submit_bid("4").await.unwrap();
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["outcome"]["status"]["status"], "continue");
    assert_eq!(json["state"]["current_round"], 2);
    assert!(json["report"].is_null());
    assert!(json.get("report_error").is_none());
}

#[tokio::test]
async fn oracle_self_play_on_disk() {
    let path = std::env::temp_dir().join(format!(
        "attrition-e2e-{}.json",
        std::process::id()
    ));
    let _ = tokio::fs::remove_file(&path).await;

    let schedule = FeeSchedule::default();
    let player = GuardrailOracle::new(
        OracleConfig {
            personality: Personality::Aggressive,
            seed: 11,
            ..OracleConfig::default()
        },
        schedule,
    );
    let svc = GameService::new(
        engine(),
        JsonFileStore::new(MatchConfig::default(), &path),
        GuardrailOracle::new(
            OracleConfig {
                seed: 12,
                ..OracleConfig::default()
            },
            schedule,
        ),
        ProfileReportGenerator,
    );

    let mut state = svc.start().await.unwrap();
    let mut ended = None;
    for _ in 0..200 {
        let bid = match svc.engine().preview(&state) {
            Some(view) => player.plan(&view, Side::A).bid,
            None => 0,
        };
        let resp = svc.submit_bid(&bid.to_string()).await.unwrap();
        check_invariants(&resp.state).unwrap();
        state = resp.state;
        if resp.outcome.is_ended() {
            ended = resp.report;
            break;
        }
    }

    assert!(state.is_finished(), "match must end");
    assert!(ended.is_some());

    let reopened = JsonFileStore::new(MatchConfig::default(), &path);
    assert_eq!(reopened.load().await.unwrap(), state);

    let _ = tokio::fs::remove_file(&path).await;
}
