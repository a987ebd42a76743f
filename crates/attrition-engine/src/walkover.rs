//! Walkover cascade.
//!
//! Once one party can never fund maintenance again, the match does not stop
//! immediately: the solvent party keeps taking uncontested rounds, paying
//! only the maintenance fee, for as long as it can still afford that fee.
//!
//! ```text
//! CASCADING --(solvent money >= fee(round))--> append walkover, round += 1
//! CASCADING --(solvent money <  fee(round))--> DONE (nothing appended)
//! ```
//!
//! ## Termination
//!
//! The solvent party's money never increases during the cascade, and
//! `fee(round) > money` for every round past
//! [`last_affordable_round`](crate::fee::last_affordable_round)`(money)`.
//! The loop therefore iterates over a finite, precomputed range of rounds
//! and usually leaves it earlier, as soon as the shrinking balance drops
//! below the fee.

use attrition_types::{
    Bankruptcy, Checkpoints, FeeSchedule, MatchState, RoundKind, RoundRecord, Side,
};

use crate::fee::{last_affordable_round, maintenance_fee};

/// Run the cascade starting at `state.current_round`.
///
/// Callers enter in one of two positions: before maintenance was charged
/// for the current round (a party could not pay it), or after a contested
/// round left a party at 0, once `current_round` has moved past that round.
///
/// Returns the appended walkover records, in order. `Bankruptcy::Both`
/// appends nothing. Does not touch `state.status`; the caller decides the
/// end reason.
pub fn run_walkover(
    state: &mut MatchState,
    bankrupt: Bankruptcy,
    schedule: &FeeSchedule,
) -> Vec<RoundRecord> {
    let Some(solvent) = bankrupt.solvent() else {
        return Vec::new();
    };

    let start = state.current_round;
    let last = last_affordable_round(schedule, state.party(solvent).money);
    let mut awarded = Vec::new();

    for round in start..=last {
        let fee = maintenance_fee(schedule, round);
        if !state.party(solvent).can_afford(fee) {
            break;
        }

        let before_a = state.party_a.money;
        let before_b = state.party_b.money;

        state.maintenance_fee_current = fee;
        let payer = state.party_mut(solvent);
        payer.money -= fee;
        payer.score += 1;

        let record = RoundRecord {
            round,
            kind: RoundKind::Walkover,
            bid_a: 0,
            bid_b: 0,
            winner: Some(solvent),
            maintenance_fee: fee,
            a: settled(state, Side::A, before_a),
            b: settled(state, Side::B, before_b),
        };

        tracing::debug!(
            round,
            fee,
            winner = %solvent,
            money = state.party(solvent).money,
            "Walkover round awarded"
        );

        state.history.push(record.clone());
        state.current_round = round.saturating_add(1);
        awarded.push(record);
    }

    tracing::info!(
        solvent = %solvent,
        rounds = awarded.len(),
        next_round = state.current_round,
        "Walkover cascade complete"
    );

    awarded
}

/// Checkpoints for a walkover round: no bid is ever paid.
fn settled(state: &MatchState, side: Side, before: u64) -> Checkpoints {
    let party = state.party(side);
    Checkpoints {
        score: party.score,
        money_before_maintenance: before,
        money_before_bid: party.money,
        money_after_bid: party.money,
    }
}
