//! Configuration error type.
//!
//! Every variant describes a setup problem.  They are raised while the loop is
//! being built and are fatal: the daily loop itself never fails.

use thiserror::Error;

use crate::NodeId;

/// The error type shared by `tti-core` and `tti-policy`.
#[derive(Debug, Error)]
pub enum TtiError {
    #[error("unknown testing cadence {0:?}")]
    UnknownCadence(String),

    #[error("{what} compliance vector has length {got}, expected {expected}")]
    ComplianceLength {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("isolation group {group} references {node}, but there are only {node_count} nodes")]
    GroupNodeOutOfRange {
        group:      usize,
        node:       NodeId,
        node_count: usize,
    },

    #[error("{node} belongs to isolation groups {first} and {second}")]
    NodeInMultipleGroups {
        node:   NodeId,
        first:  usize,
        second: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

impl TtiError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TtiError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Shorthand result type for `tti-core` and `tti-policy`.
pub type TtiResult<T> = Result<T, TtiError>;

/// Check that `value` is a finite number in `[0, 1]`.
pub fn check_fraction(name: &'static str, value: f64) -> TtiResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(TtiError::invalid(name, format!("{value} is not a fraction in [0, 1]")))
    }
}

/// Check that `value` is a finite, non-negative number.
pub fn check_non_negative(name: &'static str, value: f64) -> TtiResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TtiError::invalid(name, format!("{value} must be finite and >= 0")))
    }
}
