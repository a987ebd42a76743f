//! Result of one round-resolution call.

use serde::{Deserialize, Serialize};

use crate::{EndReason, RoundRecord};

/// Whether the match continues after a resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Continue,
    Ended(EndReason),
}

/// Everything one resolution call produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundOutcome {
    pub status: OutcomeStatus,
    /// Human-readable end message; `None` while the match continues.
    pub message: Option<String>,
    /// The contested round, if bidding took place.
    pub round: Option<RoundRecord>,
    /// Walkover rounds appended after the contested round (or instead of it).
    pub walkover: Vec<RoundRecord>,
    /// The opponent's justification for its bid.
    pub opponent_notes: Vec<String>,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(self.status, OutcomeStatus::Ended(_))
    }

    /// Number of rounds this call consumed.
    #[must_use]
    pub fn rounds_consumed(&self) -> usize {
        usize::from(self.round.is_some()) + self.walkover.len()
    }
}
