//! # attrition-engine
//!
//! **Pure deterministic round engine for Attrition.**
//!
//! The engine advances a two-party all-pay auction one round at a time:
//! it charges the escalating maintenance fee, resolves the sealed bids into
//! a winner and payments, records the round, and when a party goes broke
//! runs the walkover cascade to its end. It has:
//!
//! - **No I/O**: persistence and presentation live in the service crate
//! - **One async seam**: the [`BidOracle`] consulted for party B's bid
//! - **Atomic rounds**: state is committed in one step after invariant checks
//! - **Explicit configuration**: the fee schedule is passed in, never global

pub mod digest;
pub mod engine;
pub mod fee;
pub mod invariants;
pub mod oracle;
pub mod summary;
pub mod walkover;

pub use digest::{history_root, verify_history_root};
pub use engine::{RoundEngine, round_winner};
pub use fee::{last_affordable_round, lookahead, maintenance_fee, outlook};
pub use invariants::check_invariants;
pub use oracle::{BidOracle, clamp_bid};
pub use summary::summarize;
pub use walkover::run_walkover;
