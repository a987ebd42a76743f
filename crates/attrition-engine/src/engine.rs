//! Round engine: advances a match one round at a time.
//!
//! ## Algorithm
//!
//! 1. Compute `fee(current_round)` and snapshot both balances
//! 2. If a party cannot pay, hand off to the walkover cascade (or end the
//!    match when neither can pay)
//! 3. Deduct maintenance from both parties
//! 4. Clamp party A's bid; obtain party B's bid (pre-supplied or from the
//!    oracle, which sees the post-maintenance view) and clamp it
//! 5. Higher bid scores one point, equal bids score nothing, both pay
//! 6. Append the round record
//! 7. Both at 0: match over. One at 0: walkover cascade from the next round.
//!
//! ## Atomicity
//!
//! Every call works on a private copy of the match. The caller's
//! `MatchState` is replaced in a single assignment after the invariants
//! have been checked, so an oracle failure or an invariant violation
//! leaves it exactly as it was.

use attrition_types::{
    AttritionError, Bankruptcy, BidSuggestion, Checkpoints, EndReason, FeeSchedule, MatchState,
    MatchStatus, OutcomeStatus, Result, RoundKind, RoundOutcome, RoundRecord, Side,
};

use crate::{
    digest::history_root,
    fee::maintenance_fee,
    invariants::check_invariants,
    oracle::{BidOracle, clamp_bid},
    walkover::run_walkover,
};

/// The round-resolution state machine, parameterised by its fee schedule.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    schedule: FeeSchedule,
}

/// A round whose maintenance has been charged, waiting for bids.
struct Contested {
    state: MatchState,
    round: u32,
    fee: u64,
    before_a: u64,
    before_b: u64,
}

enum Opening {
    Contested(Contested),
    /// The round could not be played; `state` is final.
    Closed {
        state: MatchState,
        outcome: RoundOutcome,
    },
}

impl RoundEngine {
    /// Create an engine, rejecting a degenerate schedule.
    pub fn new(schedule: FeeSchedule) -> Result<Self> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    #[must_use]
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Maintenance fee of `round` under this engine's schedule.
    #[must_use]
    pub fn fee(&self, round: u32) -> u64 {
        maintenance_fee(&self.schedule, round)
    }

    /// Resolve one round, asking `oracle` for party B's bid unless a
    /// `pending` suggestion was computed ahead of time.
    ///
    /// # Errors
    /// - `MatchFinished` if the match is already over
    /// - `OracleFailed` if the oracle is the bid source and fails
    /// - `InvariantViolation` if the resulting state is inconsistent
    ///
    /// On error `state` is unchanged.
    pub async fn play_round<O: BidOracle>(
        &self,
        state: &mut MatchState,
        bid_a: u64,
        pending: Option<BidSuggestion>,
        oracle: &O,
    ) -> Result<RoundOutcome> {
        let contested = match self.open(state)? {
            Opening::Closed { state: next, outcome } => return Self::commit(state, next, outcome),
            Opening::Contested(contested) => contested,
        };

        let opponent = match pending {
            Some(suggestion) => suggestion,
            None => oracle
                .suggest_bid(&contested.state, Side::B)
                .await
                .map_err(into_oracle_failure)?,
        };

        let (next, outcome) = self.settle(contested, bid_a, opponent);
        Self::commit(state, next, outcome)
    }

    /// Resolve one round with party B's bid supplied by the caller.
    ///
    /// # Errors
    /// Same as [`play_round`](Self::play_round), minus oracle failures.
    pub fn play_round_with_bid(
        &self,
        state: &mut MatchState,
        bid_a: u64,
        opponent: BidSuggestion,
    ) -> Result<RoundOutcome> {
        match self.open(state)? {
            Opening::Closed { state: next, outcome } => Self::commit(state, next, outcome),
            Opening::Contested(contested) => {
                let (next, outcome) = self.settle(contested, bid_a, opponent);
                Self::commit(state, next, outcome)
            }
        }
    }

    /// The match as the bidders see it this round: maintenance charged to
    /// both parties. `None` if the match is over or a party cannot pay.
    #[must_use]
    pub fn preview(&self, state: &MatchState) -> Option<MatchState> {
        if state.is_finished() {
            return None;
        }
        let fee = self.fee(state.current_round);
        if !state.party_a.can_afford(fee) || !state.party_b.can_afford(fee) {
            return None;
        }
        let mut view = state.clone();
        view.maintenance_fee_current = fee;
        view.party_a.money -= fee;
        view.party_b.money -= fee;
        Some(view)
    }

    /// Ask the oracle for party B's next bid ahead of time.
    ///
    /// Returns `Ok(None)` when the coming round will not be contested.
    pub async fn predict_opponent_bid<O: BidOracle>(
        &self,
        state: &MatchState,
        oracle: &O,
    ) -> Result<Option<BidSuggestion>> {
        let Some(view) = self.preview(state) else {
            return Ok(None);
        };
        oracle
            .suggest_bid(&view, Side::B)
            .await
            .map(Some)
            .map_err(into_oracle_failure)
    }

    /// Steps 1-3: charge maintenance or divert to the cascade.
    fn open(&self, state: &MatchState) -> Result<Opening> {
        if let Some(reason) = state.end_reason() {
            return Err(AttritionError::MatchFinished { reason });
        }

        let mut next = state.clone();
        let round = next.current_round;
        let fee = self.fee(round);
        next.maintenance_fee_current = fee;

        let before_a = next.party_a.money;
        let before_b = next.party_b.money;

        let bankrupt = match (next.party_a.can_afford(fee), next.party_b.can_afford(fee)) {
            (true, true) => None,
            (false, false) => Some(Bankruptcy::Both),
            (false, true) => Some(Bankruptcy::Party(Side::A)),
            (true, false) => Some(Bankruptcy::Party(Side::B)),
        };

        let Some(bankrupt) = bankrupt else {
            next.party_a.money -= fee;
            next.party_b.money -= fee;
            return Ok(Opening::Contested(Contested {
                state: next,
                round,
                fee,
                before_a,
                before_b,
            }));
        };

        tracing::debug!(round, fee, before_a, before_b, ?bankrupt, "Maintenance unaffordable");

        let reason = match bankrupt {
            Bankruptcy::Both => EndReason::BothInsolvent,
            Bankruptcy::Party(side) => EndReason::Insolvent(side),
        };
        let walkover = run_walkover(&mut next, bankrupt, &self.schedule);
        let outcome = finish(&mut next, reason, None, walkover, Vec::new());
        Ok(Opening::Closed {
            state: next,
            outcome,
        })
    }

    /// Steps 4-7: clamp, score, pay, record, post-checks.
    fn settle(
        &self,
        contested: Contested,
        bid_a: u64,
        opponent: BidSuggestion,
    ) -> (MatchState, RoundOutcome) {
        let Contested {
            mut state,
            round,
            fee,
            before_a,
            before_b,
        } = contested;

        let mid_a = state.party_a.money;
        let mid_b = state.party_b.money;
        let bid_a = bid_a.min(mid_a);
        let bid_b = clamp_bid(opponent.bid, mid_b);

        let winner = round_winner(bid_a, bid_b);
        state.party_a.money = state.party_a.money.saturating_sub(bid_a);
        state.party_b.money = state.party_b.money.saturating_sub(bid_b);
        if let Some(side) = winner {
            state.party_mut(side).score += 1;
        }

        let record = RoundRecord {
            round,
            kind: RoundKind::Contested,
            bid_a,
            bid_b,
            winner,
            maintenance_fee: fee,
            a: Checkpoints {
                score: state.party_a.score,
                money_before_maintenance: before_a,
                money_before_bid: mid_a,
                money_after_bid: state.party_a.money,
            },
            b: Checkpoints {
                score: state.party_b.score,
                money_before_maintenance: before_b,
                money_before_bid: mid_b,
                money_after_bid: state.party_b.money,
            },
        };

        tracing::debug!(
            round,
            fee,
            bid_a,
            bid_b,
            winner = ?winner,
            money_a = state.party_a.money,
            money_b = state.party_b.money,
            "Round resolved"
        );

        state.history.push(record.clone());
        state.current_round = round.saturating_add(1);
        let notes = opponent.notes;

        let depleted = match (state.party_a.is_broke(), state.party_b.is_broke()) {
            (true, true) => Some(EndReason::BothDepleted),
            (true, false) => Some(EndReason::Depleted(Side::A)),
            (false, true) => Some(EndReason::Depleted(Side::B)),
            (false, false) => None,
        };

        let Some(reason) = depleted else {
            let outcome = RoundOutcome {
                status: OutcomeStatus::Continue,
                message: None,
                round: Some(record),
                walkover: Vec::new(),
                opponent_notes: notes,
            };
            return (state, outcome);
        };

        // Both at 0 ends here; a single party at 0 already played this
        // round, so its opponent cascades from the next one.
        let walkover = match reason {
            EndReason::Depleted(side) => {
                run_walkover(&mut state, Bankruptcy::Party(side), &self.schedule)
            }
            _ => Vec::new(),
        };
        let outcome = finish(&mut state, reason, Some(record), walkover, notes);
        (state, outcome)
    }

    fn commit(
        state: &mut MatchState,
        next: MatchState,
        outcome: RoundOutcome,
    ) -> Result<RoundOutcome> {
        check_invariants(&next)?;
        *state = next;
        Ok(outcome)
    }
}

/// Strictly higher bid wins; equal bids tie.
#[must_use]
pub fn round_winner(bid_a: u64, bid_b: u64) -> Option<Side> {
    match bid_a.cmp(&bid_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    }
}

/// Mark the match finished and build the terminal outcome.
fn finish(
    state: &mut MatchState,
    reason: EndReason,
    round: Option<RoundRecord>,
    walkover: Vec<RoundRecord>,
    opponent_notes: Vec<String>,
) -> RoundOutcome {
    state.status = MatchStatus::Finished(reason);
    let message = state.describe_end(reason);

    tracing::info!(
        reason = %reason,
        rounds = state.history.len(),
        score_a = state.party_a.score,
        score_b = state.party_b.score,
        history_root = hex::encode(history_root(&state.history)),
        "Match finished"
    );

    RoundOutcome {
        status: OutcomeStatus::Ended(reason),
        message: Some(message),
        round,
        walkover,
        opponent_notes,
    }
}

/// Keep oracle errors in the oracle bucket whatever the implementation
/// returned.
fn into_oracle_failure(err: AttritionError) -> AttritionError {
    match err {
        AttritionError::OracleFailed { .. } => err,
        other => AttritionError::OracleFailed {
            reason: other.to_string(),
        },
    }
}
