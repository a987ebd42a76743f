//! Maintenance fee schedule.
//!
//! The fee is a pure step function of the round number:
//!
//! ```text
//! fee(round) = max(0, floor((round - 1) / interval)) * increment
//! ```
//!
//! With the default schedule (interval 2, increment 5) rounds 1-2 are free,
//! rounds 3-4 cost 5, rounds 5-6 cost 10, and so on. Nothing here looks at
//! match history, so the same functions serve live charging and lookahead.

use attrition_types::{FeeSchedule, MaintenanceOutlook};

/// Maintenance fee charged in `round`.
#[must_use]
pub fn maintenance_fee(schedule: &FeeSchedule, round: u32) -> u64 {
    let interval = schedule.interval.max(1);
    let level = round.saturating_sub(1) / interval;
    u64::from(level).saturating_mul(schedule.increment)
}

/// Fees of the `n` rounds following `round` (exclusive).
#[must_use]
pub fn lookahead(schedule: &FeeSchedule, round: u32, n: u32) -> Vec<u64> {
    (1..=n)
        .map(|offset| maintenance_fee(schedule, round.saturating_add(offset)))
        .collect()
}

/// Fees of the next three rounds after `round`.
#[must_use]
pub fn outlook(schedule: &FeeSchedule, round: u32) -> MaintenanceOutlook {
    MaintenanceOutlook {
        next_round: maintenance_fee(schedule, round.saturating_add(1)),
        in_2_rounds: maintenance_fee(schedule, round.saturating_add(2)),
        in_3_rounds: maintenance_fee(schedule, round.saturating_add(3)),
    }
}

/// The last round whose fee does not exceed `money`.
///
/// `fee(r) <= money` holds exactly while `floor((r - 1) / interval)` is at
/// most `money / increment`, i.e. for `r <= interval * (money / increment + 1)`.
/// Requires a validated schedule (`increment > 0`).
#[must_use]
pub fn last_affordable_round(schedule: &FeeSchedule, money: u64) -> u32 {
    let increment = schedule.increment.max(1);
    let interval = u64::from(schedule.interval.max(1));
    let levels = money / increment;
    let last = interval.saturating_mul(levels.saturating_add(1));
    u32::try_from(last).unwrap_or(u32::MAX)
}
