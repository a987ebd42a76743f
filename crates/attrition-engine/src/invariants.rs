//! Match invariant checker.
//!
//! Invariants enforced before every state transition is committed:
//! ```text
//! history.len() == current_round - 1, history[i].round == i + 1
//! ∀ party: score == |{ r ∈ history : r.winner == party }|
//! ∀ party: money never increases, from starting_money to the current balance
//! ∀ record: maintenance and bid deductions match the recorded fee and bid
//! ```
//!
//! A violation is a bug in the engine, never a recoverable game condition.

use attrition_types::{AttritionError, MatchState, Result, RoundKind, RoundRecord, Side};

/// Verify every structural invariant of `state`.
///
/// # Errors
/// Returns [`AttritionError::InvariantViolation`] describing the first
/// broken invariant.
pub fn check_invariants(state: &MatchState) -> Result<()> {
    let expected_len = state
        .current_round
        .checked_sub(1)
        .ok_or_else(|| violation("current_round must be >= 1".into()))?;
    if state.history.len() != expected_len as usize {
        return Err(violation(format!(
            "history has {} records but current_round is {}",
            state.history.len(),
            state.current_round
        )));
    }

    for side in Side::BOTH {
        check_party(state, side)?;
    }

    for (i, rec) in state.history.iter().enumerate() {
        if rec.round as usize != i + 1 {
            return Err(violation(format!(
                "record {i} carries round {} (expected {})",
                rec.round,
                i + 1
            )));
        }
        check_record(rec)?;
    }

    Ok(())
}

fn check_party(state: &MatchState, side: Side) -> Result<()> {
    let party = state.party(side);

    let wins = state
        .history
        .iter()
        .filter(|r| r.winner == Some(side))
        .count();
    if party.score as usize != wins {
        return Err(violation(format!(
            "party {side} score {} != {wins} recorded wins",
            party.score
        )));
    }

    // Money flows through the records without gaps.
    let mut running = state.starting_money;
    let mut score = 0u32;
    for rec in &state.history {
        let cp = rec.checkpoints(side);
        if cp.money_before_maintenance != running {
            return Err(violation(format!(
                "party {side} round {}: entered with {} but previous round left {running}",
                rec.round, cp.money_before_maintenance
            )));
        }
        if rec.winner == Some(side) {
            score += 1;
        }
        if cp.score != score {
            return Err(violation(format!(
                "party {side} round {}: recorded score {} != running score {score}",
                rec.round, cp.score
            )));
        }
        running = cp.money_after_bid;
    }
    if party.money != running {
        return Err(violation(format!(
            "party {side} holds {} but history ends at {running}",
            party.money
        )));
    }

    Ok(())
}

fn check_record(rec: &RoundRecord) -> Result<()> {
    for side in Side::BOTH {
        let cp = rec.checkpoints(side);
        let charged = match rec.kind {
            RoundKind::Contested => rec.maintenance_fee,
            RoundKind::Walkover if rec.winner == Some(side) => rec.maintenance_fee,
            RoundKind::Walkover => 0,
        };
        if cp.money_before_maintenance.checked_sub(charged) != Some(cp.money_before_bid) {
            return Err(violation(format!(
                "round {} party {side}: maintenance {charged} does not explain {} -> {}",
                rec.round, cp.money_before_maintenance, cp.money_before_bid
            )));
        }
        if cp.money_before_bid.checked_sub(rec.bid(side)) != Some(cp.money_after_bid) {
            return Err(violation(format!(
                "round {} party {side}: bid {} does not explain {} -> {}",
                rec.round,
                rec.bid(side),
                cp.money_before_bid,
                cp.money_after_bid
            )));
        }
    }

    if rec.kind == RoundKind::Walkover && (rec.winner.is_none() || rec.bid_a != 0 || rec.bid_b != 0)
    {
        return Err(violation(format!(
            "walkover round {} must have a winner and zero bids",
            rec.round
        )));
    }

    Ok(())
}

fn violation(reason: String) -> AttritionError {
    AttritionError::InvariantViolation { reason }
}
