//! Rule-based opponent oracle.
//!
//! [`GuardrailOracle`] plans a bid from the match view in three steps:
//!
//! 1. **Reserve**: hold back next round's maintenance. When that fee is
//!    already out of reach, the party is doomed and spikes with everything.
//! 2. **Forecast**: median of the opponent's recent contested bids, or 15%
//!    of the opponent's bankroll before any bid has been seen.
//! 3. **Range**: outbid the forecast when the personality ceiling allows
//!    it, otherwise place a cheap bait bid. The bid is sampled inside the
//!    range with an RNG seeded from the config seed, round, and side.

use attrition_engine::{BidOracle, outlook};
use attrition_types::{
    BidSuggestion, FeeSchedule, MaintenanceOutlook, MatchState, OracleConfig, Personality, Result,
    RoundKind, Side, constants,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the planned bid is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Next round is unaffordable whatever happens: spend it all now.
    Spike,
    /// Nothing spendable after the reserve.
    Save,
    /// Outbid the forecast.
    Contest,
    /// Concede cheaply and let the opponent overpay.
    Bait,
}

/// A fully worked bid decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidPlan {
    pub intent: Intent,
    pub spendable: u64,
    pub forecast: u64,
    pub range: (u64, u64),
    pub bid: u64,
    pub outlook: MaintenanceOutlook,
}

/// Opponent oracle that never needs a network round-trip.
#[derive(Debug, Clone)]
pub struct GuardrailOracle {
    config: OracleConfig,
    schedule: FeeSchedule,
}

impl GuardrailOracle {
    #[must_use]
    pub fn new(config: OracleConfig, schedule: FeeSchedule) -> Self {
        Self { config, schedule }
    }

    #[must_use]
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Plan a bid for `acting` on a post-maintenance view.
    #[must_use]
    pub fn plan(&self, state: &MatchState, acting: Side) -> BidPlan {
        let money = state.party(acting).money;
        let outlook = outlook(&self.schedule, state.current_round);
        let forecast = self.forecast(state, acting.opponent());

        let doomed = outlook.next_round > money;
        let spendable = if doomed {
            money
        } else {
            money - outlook.next_round
        };

        let (intent, range) = if doomed {
            (Intent::Spike, (money, money))
        } else if spendable == 0 {
            (Intent::Save, (0, 0))
        } else {
            self.pick_range(state, spendable, forecast)
        };

        let bid = self.sample(state, acting, range).min(money);

        BidPlan {
            intent,
            spendable,
            forecast,
            range,
            bid,
            outlook,
        }
    }

    /// Median of the opponent's recent contested bids.
    fn forecast(&self, state: &MatchState, opponent: Side) -> u64 {
        let mut recent: Vec<u64> = state
            .recent_rounds(self.config.lookback)
            .iter()
            .filter(|r| r.kind == RoundKind::Contested)
            .map(|r| r.bid(opponent))
            .collect();

        let bankroll = state.party(opponent).money;
        if recent.is_empty() {
            return percent_of(bankroll, constants::COLD_START_BID_PERCENT);
        }
        recent.sort_unstable();
        recent[recent.len() / 2].min(bankroll)
    }

    fn pick_range(
        &self,
        state: &MatchState,
        spendable: u64,
        forecast: u64,
    ) -> (Intent, (u64, u64)) {
        let personality = self.config.personality;
        if personality == Personality::Chaotic {
            return (Intent::Contest, (0, spendable));
        }

        let mut ceiling_pct = personality.ceiling_percent();
        if state.history.len() < self.config.lookback {
            ceiling_pct = ceiling_pct.min(constants::EARLY_GAME_BID_CAP_PERCENT);
        }
        let ceiling = percent_of(spendable, ceiling_pct);

        let target = forecast.saturating_add(1);
        if target <= ceiling {
            let high = target.saturating_add(forecast / 4).min(ceiling);
            (Intent::Contest, (target, high))
        } else {
            let high = (spendable / 20).max(1).min(ceiling.max(1));
            (Intent::Bait, (0, high))
        }
    }

    fn sample(&self, state: &MatchState, acting: Side, (low, high): (u64, u64)) -> u64 {
        if low >= high {
            return low;
        }
        let side_salt = match acting {
            Side::A => 0x5A5A_0000_0000_0000,
            Side::B => 0xA5A5_0000_0000_0000,
        };
        let seed = self
            .config
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ u64::from(state.current_round)
            ^ side_salt;
        StdRng::seed_from_u64(seed).gen_range(low..=high)
    }
}

/// `floor(amount * pct / 100)` without overflow for `pct <= 100`.
fn percent_of(amount: u64, pct: u64) -> u64 {
    amount / 100 * pct + amount % 100 * pct / 100
}

impl BidPlan {
    /// Short, actionable notes explaining the decision.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::with_capacity(4);
        match self.intent {
            Intent::Spike => notes.push(format!(
                "Next maintenance ({}) is out of reach: all-in at {}.",
                self.outlook.next_round, self.bid
            )),
            Intent::Save => notes.push(format!(
                "Holding everything for next maintenance ({}).",
                self.outlook.next_round
            )),
            Intent::Contest => notes.push(format!(
                "Outbidding forecast {} within {}..={}.",
                self.forecast, self.range.0, self.range.1
            )),
            Intent::Bait => notes.push(format!(
                "Forecast {} exceeds the cap; baiting with {}.",
                self.forecast, self.bid
            )),
        }
        if self.intent != Intent::Spike {
            notes.push(format!(
                "Reserving {} for next round; {} spendable.",
                self.outlook.next_round, self.spendable
            ));
        }
        notes.push(format!(
            "Upcoming maintenance: {} / {} / {}.",
            self.outlook.next_round, self.outlook.in_2_rounds, self.outlook.in_3_rounds
        ));
        notes
    }
}

impl BidOracle for GuardrailOracle {
    async fn suggest_bid(&self, state: &MatchState, acting: Side) -> Result<BidSuggestion> {
        let plan = self.plan(state, acting);
        tracing::debug!(
            round = state.current_round,
            acting = %acting,
            intent = ?plan.intent,
            forecast = plan.forecast,
            bid = plan.bid,
            "Oracle bid planned"
        );
        let bid = i64::try_from(plan.bid).unwrap_or(i64::MAX);
        Ok(BidSuggestion::new(bid, plan.notes()))
    }
}
