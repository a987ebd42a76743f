//! Caller-facing bid validation.
//!
//! Bids are checked here, before any state is touched, so the caller can
//! re-prompt. The engine still clamps internally as a second line.

use attrition_types::{AttritionError, Result};

/// Parse a raw bid and check it lies in `[0, max]`.
///
/// # Errors
/// Returns [`AttritionError::InvalidBid`] naming the valid range for
/// non-integers, negatives, and values above `max`.
pub fn parse_bid(raw: &str, max: u64) -> Result<u64> {
    let invalid = || AttritionError::InvalidBid {
        input: raw.to_string(),
        max,
    };
    let bid: u64 = raw.trim().parse().map_err(|_| invalid())?;
    if bid > max {
        return Err(invalid());
    }
    Ok(bid)
}
