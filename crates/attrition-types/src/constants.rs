//! System-wide constants for the Attrition engine.

/// Money each party starts a match with.
pub const STARTING_MONEY: u64 = 100;

/// Largest accepted starting money. Keeps a walkover cascade within a few
/// tens of thousands of rounds under the default schedule.
pub const MAX_STARTING_MONEY: u64 = 1_000_000_000;

/// Number of rounds that share one maintenance fee level.
pub const MAINTENANCE_ROUND_INTERVAL: u32 = 2;

/// Amount the maintenance fee rises by at every interval boundary.
pub const MAINTENANCE_COST_INCREMENT: u64 = 5;

/// Display name of party A (the human side in the hosted game).
pub const DEFAULT_PARTY_A_NAME: &str = "PLAYER";

/// Display name of party B (the oracle-driven side).
pub const DEFAULT_PARTY_B_NAME: &str = "AI";

/// Number of recent rounds an oracle looks at when forecasting.
pub const DEFAULT_ORACLE_LOOKBACK: usize = 6;

/// Cold-start forecast: share of the opponent's bankroll assumed as their
/// median bid when there is no history yet, in percent.
pub const COLD_START_BID_PERCENT: u64 = 15;

/// Early-game ceiling on a bid range, in percent of spendable money.
pub const EARLY_GAME_BID_CAP_PERCENT: u64 = 40;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Attrition";
