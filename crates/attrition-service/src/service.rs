//! Request handlers for the single hosted match.
//!
//! `GameService` ties the engine to a store, an opponent oracle, and a
//! report generator. Each handler loads the match, works on it, and saves
//! it back only when the whole step succeeded.

use attrition_engine::{BidOracle, RoundEngine, summarize};
use attrition_types::{BidSuggestion, MatchState, Result, RoundOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::ReportGenerator;
use crate::store::MatchStore;
use crate::validation::parse_bid;

/// Result of a submitted bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidResponse {
    pub outcome: RoundOutcome,
    pub state: MatchState,
    /// Present only when the match ended and the report was generated.
    pub report: Option<String>,
    /// Why the report is missing when the match ended without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_error: Option<String>,
}

pub struct GameService<S, O, R> {
    engine: RoundEngine,
    store: S,
    oracle: O,
    reporter: R,
}

impl<S, O, R> GameService<S, O, R>
where
    S: MatchStore,
    O: BidOracle,
    R: ReportGenerator,
{
    pub fn new(engine: RoundEngine, store: S, oracle: O, reporter: R) -> Self {
        Self {
            engine,
            store,
            oracle,
            reporter,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current match, created on first access.
    pub async fn state(&self) -> Result<MatchState> {
        self.store.load().await
    }

    /// Load (or create) the match and pre-compute the opponent's next bid.
    pub async fn start(&self) -> Result<MatchState> {
        let state = self.store.load().await?;
        let pending = self.refresh_prediction(&state).await;
        self.store.commit(&state, pending).await?;
        Ok(state)
    }

    /// Validate and resolve party A's bid.
    ///
    /// # Errors
    /// - `InvalidBid` before anything is touched
    /// - `MatchFinished` when the match is over
    /// - `OracleFailed` when no pending bid exists and the oracle fails
    /// - `Storage` when the resolved round cannot be persisted
    ///
    /// On any error the stored match and pending bid are unchanged.
    pub async fn submit_bid(&self, raw: &str) -> Result<BidResponse> {
        let mut state = self.store.load().await?;
        let bid = parse_bid(raw, state.party_a.money)?;
        let pending = self.store.pending().await?;

        let outcome = self
            .engine
            .play_round(&mut state, bid, pending, &self.oracle)
            .await?;

        let (report, report_error, next_pending) = if outcome.is_ended() {
            let (report, error) = self.report(&state).await;
            (report, error, None)
        } else {
            (None, None, self.refresh_prediction(&state).await)
        };

        // The consumed pending bid must never outlive the round it was for.
        self.store.commit(&state, next_pending).await?;

        Ok(BidResponse {
            outcome,
            state,
            report,
            report_error,
        })
    }

    /// Throw the match away and start a fresh one.
    pub async fn restart(&self) -> Result<MatchState> {
        let state = self.store.reset().await?;
        info!(starting_money = state.starting_money, "Match restarted");
        Ok(state)
    }

    async fn refresh_prediction(&self, state: &MatchState) -> Option<BidSuggestion> {
        match self.engine.predict_opponent_bid(state, &self.oracle).await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(round = state.current_round, error = %err, "Opponent prediction failed");
                None
            }
        }
    }

    async fn report(&self, state: &MatchState) -> (Option<String>, Option<String>) {
        let summary = summarize(state);
        match self.reporter.generate_report(&summary).await {
            Ok(text) => (Some(text), None),
            Err(err) => {
                warn!(rounds = summary.rounds, error = %err, "Report generation failed");
                (None, Some(err.to_string()))
            }
        }
    }
}
