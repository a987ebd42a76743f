//! Configuration types for matches, the fee schedule, and the opponent oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AttritionError, Result, constants};

/// Step schedule for the per-round maintenance fee.
///
/// `fee(round) = floor((round - 1) / interval) * increment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Rounds per fee level.
    pub interval: u32,
    /// Fee increase per level.
    pub increment: u64,
}

impl FeeSchedule {
    /// Create a schedule, rejecting degenerate parameters.
    pub fn new(interval: u32, increment: u64) -> Result<Self> {
        let schedule = Self {
            interval,
            increment,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// A zero interval is undefined; a zero increment never raises the fee,
    /// so a walkover cascade would never end.
    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            return Err(AttritionError::Configuration(
                "fee interval must be > 0".into(),
            ));
        }
        if self.increment == 0 {
            return Err(AttritionError::Configuration(
                "fee increment must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            interval: constants::MAINTENANCE_ROUND_INTERVAL,
            increment: constants::MAINTENANCE_COST_INCREMENT,
        }
    }
}

/// Configuration for a single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Money each party starts with.
    pub starting_money: u64,
    /// Display name of party A.
    pub party_a_name: String,
    /// Display name of party B.
    pub party_b_name: String,
    /// Maintenance fee schedule.
    pub fees: FeeSchedule,
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.fees.validate()?;
        if self.starting_money > constants::MAX_STARTING_MONEY {
            return Err(AttritionError::Configuration(format!(
                "starting money {} exceeds {}",
                self.starting_money,
                constants::MAX_STARTING_MONEY
            )));
        }
        if self.party_a_name == self.party_b_name {
            return Err(AttritionError::Configuration(format!(
                "party names must differ (both are {:?})",
                self.party_a_name
            )));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_money: constants::STARTING_MONEY,
            party_a_name: constants::DEFAULT_PARTY_A_NAME.to_string(),
            party_b_name: constants::DEFAULT_PARTY_B_NAME.to_string(),
            fees: FeeSchedule::default(),
        }
    }
}

/// Bidding temperament of the built-in opponent oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Conservative,
    #[default]
    Neutral,
    Aggressive,
    /// Ignores the early-game cap and may bid its whole spendable money.
    Chaotic,
}

impl Personality {
    /// Upper bound of a bid range, in percent of spendable money.
    #[must_use]
    pub fn ceiling_percent(self) -> u64 {
        match self {
            Self::Conservative => 25,
            Self::Neutral => constants::EARLY_GAME_BID_CAP_PERCENT,
            Self::Aggressive => 60,
            Self::Chaotic => 100,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conservative => write!(f, "conservative"),
            Self::Neutral => write!(f, "neutral"),
            Self::Aggressive => write!(f, "aggressive"),
            Self::Chaotic => write!(f, "chaotic"),
        }
    }
}

/// Configuration for the rule-based opponent oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub personality: Personality,
    /// How many recent rounds feed the opponent forecast.
    pub lookback: usize,
    /// RNG seed; the same seed and state always give the same bid.
    pub seed: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            personality: Personality::Neutral,
            lookback: constants::DEFAULT_ORACLE_LOOKBACK,
            seed: 0,
        }
    }
}
