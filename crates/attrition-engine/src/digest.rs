//! History digest for replay comparison.
//!
//! Two engines fed the same bids must produce the same history. The
//! `history_root` is a SHA-256 over the ordered round records that lets two
//! runs be compared without diffing full payloads.

use attrition_types::{RoundKind, RoundRecord, Side};
use sha2::{Digest, Sha256};

/// Compute the digest over an ordered history.
///
/// Depends on round numbers, kinds, bids, winners, fees and every money
/// and score checkpoint. Order matters.
#[must_use]
pub fn history_root(history: &[RoundRecord]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"attrition:history_root:v1:");
    hasher.update((history.len() as u64).to_le_bytes());

    for rec in history {
        hasher.update(rec.round.to_le_bytes());
        hasher.update([match rec.kind {
            RoundKind::Contested => 0u8,
            RoundKind::Walkover => 1u8,
        }]);
        hasher.update(rec.bid_a.to_le_bytes());
        hasher.update(rec.bid_b.to_le_bytes());
        hasher.update([match rec.winner {
            None => 0u8,
            Some(Side::A) => 1u8,
            Some(Side::B) => 2u8,
        }]);
        hasher.update(rec.maintenance_fee.to_le_bytes());
        for cp in [&rec.a, &rec.b] {
            hasher.update(cp.score.to_le_bytes());
            hasher.update(cp.money_before_maintenance.to_le_bytes());
            hasher.update(cp.money_before_bid.to_le_bytes());
            hasher.update(cp.money_after_bid.to_le_bytes());
        }
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Verify that `history` hashes to `expected_root`.
#[must_use]
pub fn verify_history_root(history: &[RoundRecord], expected_root: &[u8; 32]) -> bool {
    history_root(history) == *expected_root
}
