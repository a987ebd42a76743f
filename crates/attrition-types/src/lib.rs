//! # attrition-types
//!
//! Shared types, errors, and configuration for the **Attrition** engine, a
//! repeated two-party sealed-bid all-pay auction with escalating maintenance.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Parties**: [`Side`], [`Bankruptcy`], [`Party`]
//! - **History**: [`RoundRecord`], [`RoundKind`], [`Checkpoints`]
//! - **Match aggregate**: [`MatchState`], [`MatchStatus`], [`EndReason`]
//! - **Resolution result**: [`RoundOutcome`], [`OutcomeStatus`]
//! - **Oracle exchange**: [`BidSuggestion`], [`MaintenanceOutlook`]
//! - **Reporting**: [`MatchSummary`] and its parts
//! - **Configuration**: [`FeeSchedule`], [`MatchConfig`], [`OracleConfig`]
//! - **Errors**: [`AttritionError`] with `AT_ERR_` prefix codes
//! - **Constants**: defaults and limits

pub mod bid;
pub mod config;
pub mod constants;
pub mod error;
pub mod outcome;
pub mod party;
pub mod round;
pub mod side;
pub mod state;
pub mod summary;

pub use bid::*;
pub use config::*;
pub use error::*;
pub use outcome::*;
pub use party::*;
pub use round::*;
pub use side::*;
pub use state::*;
pub use summary::*;

// Constants are accessed via `attrition_types::constants::FOO`
// (not re-exported to avoid name collisions).
