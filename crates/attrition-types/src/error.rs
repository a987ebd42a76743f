//! Error types for the Attrition engine.
//!
//! All errors use the `AT_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Bid input errors
//! - 2xx: Match lifecycle errors
//! - 3xx: Collaborator errors (oracle, report generator, storage)
//! - 4xx: Configuration errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::EndReason;

/// Central error enum for all Attrition operations.
#[derive(Debug, Error)]
pub enum AttritionError {
    // =================================================================
    // Bid Input Errors (1xx)
    // =================================================================
    /// A submitted bid was non-numeric or outside `[0, max]`.
    #[error("AT_ERR_100: Bid must be between 0 and {max} (got {input:?})")]
    InvalidBid { input: String, max: u64 },

    // =================================================================
    // Match Lifecycle Errors (2xx)
    // =================================================================
    /// The match already reached a terminal state; no more rounds.
    #[error("AT_ERR_200: Match is finished: {reason}")]
    MatchFinished { reason: EndReason },

    /// A state invariant broke. Always a programming error.
    #[error("AT_ERR_201: Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    // =================================================================
    // Collaborator Errors (3xx)
    // =================================================================
    /// The opponent-bid oracle rejected or timed out.
    #[error("AT_ERR_300: Opponent oracle failed: {reason}")]
    OracleFailed { reason: String },

    /// The narrative report generator failed.
    #[error("AT_ERR_301: Report generation failed: {reason}")]
    ReportFailed { reason: String },

    /// The persistence backend failed to load or save.
    #[error("AT_ERR_302: Storage error: {reason}")]
    Storage { reason: String },

    // =================================================================
    // Configuration Errors (4xx)
    // =================================================================
    /// Configuration error (invalid fee schedule, missing fields, etc.).
    #[error("AT_ERR_400: Configuration error: {0}")]
    Configuration(String),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("AT_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("AT_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (disk).
    #[error("AT_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AttritionError>;

impl From<std::io::Error> for AttritionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AttritionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn invalid_bid_names_range() {
        let err = AttritionError::InvalidBid {
            input: "120".into(),
            max: 95,
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("AT_ERR_100"), "Got: {msg}");
        assert!(msg.contains("between 0 and 95"));
        assert!(msg.contains("120"));
    }

    #[test]
    fn match_finished_carries_reason() {
        let err = AttritionError::MatchFinished {
            reason: EndReason::Depleted(Side::B),
        };
        let msg = format!("{err}");
        assert!(msg.contains("AT_ERR_200"));
        assert!(msg.contains("party B hit $0"));
    }

    #[test]
    fn all_errors_have_at_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(AttritionError::OracleFailed {
                reason: "timeout".into(),
            }),
            Box::new(AttritionError::ReportFailed {
                reason: "offline".into(),
            }),
            Box::new(AttritionError::Storage {
                reason: "disk".into(),
            }),
            Box::new(AttritionError::Configuration("interval".into())),
            Box::new(AttritionError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("AT_ERR_"),
                "Error missing AT_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AttritionError = io.into();
        assert!(matches!(err, AttritionError::Io(_)));
    }
}
