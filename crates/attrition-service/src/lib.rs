//! # Attrition Service
//!
//! Everything around the round engine that a hosted match needs:
//!
//! - [`validation`]: caller-facing bid checks
//! - [`store`]: match persistence ([`MemoryStore`], [`JsonFileStore`])
//! - [`oracle`]: the rule-based [`GuardrailOracle`]
//! - [`report`]: capital-profile reports
//! - [`service`]: the [`GameService`] request handlers

pub mod oracle;
pub mod report;
pub mod service;
pub mod store;
pub mod validation;

pub use oracle::{BidPlan, GuardrailOracle, Intent};
pub use report::{ProfileReportGenerator, ReportGenerator};
pub use service::{BidResponse, GameService};
pub use store::{JsonFileStore, MatchStore, MemoryStore};
pub use validation::parse_bid;
