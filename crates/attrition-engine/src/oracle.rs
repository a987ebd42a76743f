//! The opponent-bid oracle seam.
//!
//! The oracle is the only asynchronous collaborator the engine talks to.
//! It receives a read-only view of the match (after this round's
//! maintenance has been charged) and proposes a bid for the acting party.

use std::future::Future;

use attrition_types::{BidSuggestion, MatchState, Result, Side};

/// Source of opponent bids.
///
/// Implementations may be slow or fail. A failure must be reported as an
/// error; the engine never replaces a failed suggestion with a default bid.
pub trait BidOracle: Send + Sync {
    /// Propose a bid for `acting` given the current match view.
    fn suggest_bid(
        &self,
        state: &MatchState,
        acting: Side,
    ) -> impl Future<Output = Result<BidSuggestion>> + Send;
}

/// Clamp an untrusted bid into `[0, available]`.
#[must_use]
pub fn clamp_bid(raw: i64, available: u64) -> u64 {
    u64::try_from(raw).map_or(0, |bid| bid.min(available))
}
