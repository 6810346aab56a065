//! Error types for loan operations.

use loancast_math::MathError;
use thiserror::Error;

/// A specialized Result type for loan operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// Errors raised by the validating and forecasting layers.
///
/// The amortization engine itself never fails; these come from
/// [`LoanTerms`](crate::terms::LoanTerms) validation and from balance
/// forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// Principal outside the accepted range.
    #[error("Invalid loan amount {value}: {reason}")]
    InvalidPrincipal {
        /// The rejected principal.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// Annual rate outside the accepted range.
    #[error("Invalid interest rate {value}%: {reason}")]
    InvalidRate {
        /// The rejected annual rate, in percent.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// Term outside the accepted range.
    #[error("Invalid loan term {value} years: must be between {min} and {max} years")]
    InvalidTerm {
        /// The rejected term.
        value: u32,
        /// Shortest accepted term.
        min: u32,
        /// Longest accepted term.
        max: u32,
    },

    /// Too few samples for the forecasting policy.
    #[error("Insufficient samples: need at least {required} data points, got {actual}")]
    InsufficientSamples {
        /// Minimum required samples.
        required: usize,
        /// Samples supplied.
        actual: usize,
    },

    /// A selected period is not part of the schedule.
    #[error("Period {period} is outside the schedule (last period is {last})")]
    PeriodOutOfRange {
        /// The requested period.
        period: u32,
        /// Last period of the schedule.
        last: u32,
    },

    /// Failure inside the interpolation engine.
    #[error("Interpolation failed: {0}")]
    Interpolation(#[from] MathError),
}

impl LoanError {
    /// Creates an invalid principal error.
    #[must_use]
    pub fn invalid_principal(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidPrincipal {
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            value,
            reason: reason.into(),
        }
    }
}
