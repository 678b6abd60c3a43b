//! # Errors
//!
//! Setup-time configuration errors and run-time protocol violations.
//! Sampling itself never fails.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ReliabilityError>;

/// Errors raised by the failure model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReliabilityError {
    /// Component constructed with the reserved maintenance token.
    #[error("cannot name a component '{name}'")]
    ReservedName { name: String },

    /// Distribution parameters rejected at setup.
    #[error("invalid {family} distribution: {reason}")]
    InvalidDistribution { family: String, reason: String },

    /// Scalar parameter outside its domain.
    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// WELL parameters outside the supported 512-bit family.
    #[error("unsupported generator parameters: {reason}")]
    UnsupportedGenerator { reason: String },

    /// Unrecognized label in configuration input.
    #[error("unknown {kind} '{label}'")]
    UnknownLabel { kind: &'static str, label: String },

    /// `fail_idx` does not name a failure mode of the component.
    #[error("component '{component}' has no failure mode {index}")]
    UnknownFailureMode { component: String, index: usize },

    /// Status snapshot does not fit the component.
    #[error("status for '{component}' carries {actual} values, expected {expected}")]
    StatusMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },

    /// Operating a component that is down for repair.
    #[error("can't operate '{component}' in downtime ({downtime_remaining} h remaining)")]
    NotOperational {
        component: String,
        downtime_remaining: f64,
    },

    /// Commit would drive a wear-out channel below zero; a failure should
    /// have been generated first.
    #[error(
        "failure should have been generated for '{component}' mode {index}: \
         consumption {consumption} exceeds life remaining {life_remaining}"
    )]
    LifeExhausted {
        component: String,
        index: usize,
        consumption: f64,
        life_remaining: f64,
    },

    /// Replayed event belongs to another component.
    #[error("event recorded for '{actual}' replayed on '{expected}'")]
    ComponentMismatch { expected: String, actual: String },

    /// Malformed plant description.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ReliabilityError {
    /// True for errors that signal a dispatcher/model ordering bug rather
    /// than bad configuration.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::NotOperational { .. } | Self::LifeExhausted { .. }
        )
    }
}

impl From<serde_json::Error> for ReliabilityError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_name_message() {
        let err = ReliabilityError::ReservedName {
            name: "MAINTENANCE".to_string(),
        };
        assert_eq!(err.to_string(), "cannot name a component 'MAINTENANCE'");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_invariant_classification() {
        let err = ReliabilityError::LifeExhausted {
            component: "pump".to_string(),
            index: 0,
            consumption: 60.0,
            life_remaining: 50.0,
        };
        assert!(err.is_invariant_violation());
        assert!(err.to_string().contains("pump"));
    }
}
