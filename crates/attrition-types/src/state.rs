//! The match aggregate.
//!
//! [`MatchState`] is the single mutable record of a match. It is owned by
//! the surrounding service, handed to the round engine for one round at a
//! time, and persisted between requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MatchConfig, Party, RoundRecord, Side};

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Neither party could pay the maintenance fee.
    BothInsolvent,
    /// This party could not pay the maintenance fee.
    Insolvent(Side),
    /// Both parties were left with exactly 0 after a round.
    BothDepleted,
    /// This party was left with exactly 0 after a round.
    Depleted(Side),
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothInsolvent => write!(f, "both parties could not afford maintenance"),
            Self::Insolvent(side) => write!(f, "party {side} could not afford maintenance"),
            Self::BothDepleted => write!(f, "both parties hit $0"),
            Self::Depleted(side) => write!(f, "party {side} hit $0"),
        }
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Finished(EndReason),
}

/// Full state of one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchState {
    /// Money both parties started with.
    pub starting_money: u64,
    /// Next round to be played (1-based).
    pub current_round: u32,
    /// Fee of the most recently charged round.
    pub maintenance_fee_current: u64,
    pub party_a: Party,
    pub party_b: Party,
    /// Append-only; `history[i].round == i + 1`.
    pub history: Vec<RoundRecord>,
    pub status: MatchStatus,
    /// When this match was created.
    pub created_at: DateTime<Utc>,
}

impl MatchState {
    /// Create a fresh match at round 1.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            starting_money: config.starting_money,
            current_round: 1,
            maintenance_fee_current: 0,
            party_a: Party::new(config.party_a_name.clone(), config.starting_money),
            party_b: Party::new(config.party_b_name.clone(), config.starting_money),
            history: Vec::new(),
            status: MatchStatus::InProgress,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn party(&self, side: Side) -> &Party {
        match side {
            Side::A => &self.party_a,
            Side::B => &self.party_b,
        }
    }

    pub fn party_mut(&mut self, side: Side) -> &mut Party {
        match side {
            Side::A => &mut self.party_a,
            Side::B => &mut self.party_b,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, MatchStatus::Finished(_))
    }

    /// The end reason, if the match is over.
    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.status {
            MatchStatus::InProgress => None,
            MatchStatus::Finished(reason) => Some(reason),
        }
    }

    /// The last `n` rounds, oldest first.
    #[must_use]
    pub fn recent_rounds(&self, n: usize) -> &[RoundRecord] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Human-readable end message using the parties' display names.
    #[must_use]
    pub fn describe_end(&self, reason: EndReason) -> String {
        match reason {
            EndReason::BothInsolvent => {
                "Both players could not afford maintenance fees.".to_string()
            }
            EndReason::Insolvent(side) => format!(
                "{} could not afford maintenance fees.",
                self.party(side).name
            ),
            EndReason::BothDepleted => "Both players hit $0.".to_string(),
            EndReason::Depleted(side) => format!("{} hit $0.", self.party(side).name),
        }
    }
}
