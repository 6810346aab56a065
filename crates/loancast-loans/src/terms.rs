//! Validated loan terms.
//!
//! [`LoanTerms`] is the enforcing layer in front of the pure
//! [`engine`](crate::engine) functions: construct it once, and every
//! computation reached through it runs on inputs inside [`LoanBounds`].

use serde::{Deserialize, Serialize};

use crate::engine::{
    compute_monthly_payment, compute_totals, generate_schedule, monthly_rate, number_of_periods,
    LoanTotals,
};
use crate::error::{LoanError, LoanResult};
use crate::schedule::AmortizationSchedule;

/// Accepted ranges for loan terms.
///
/// Defaults: principal in `(0, 10,000,000]`, annual rate in `(0, 30]`
/// percent, term of 1 to 50 years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanBounds {
    /// Largest accepted principal.
    pub max_principal: f64,
    /// Largest accepted annual rate, in percent.
    pub max_rate_percent: f64,
    /// Longest accepted term, in years.
    pub max_term_years: u32,
    /// Accept a 0% rate (interest-free loans).
    pub allow_zero_rate: bool,
}

impl Default for LoanBounds {
    fn default() -> Self {
        Self {
            max_principal: 10_000_000.0,
            max_rate_percent: 30.0,
            max_term_years: 50,
            allow_zero_rate: false,
        }
    }
}

impl LoanBounds {
    /// Shortest accepted term, in years.
    pub const MIN_TERM_YEARS: u32 = 1;

    /// Checks the terms against these bounds.
    pub fn validate(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> LoanResult<()> {
        if !principal.is_finite() {
            return Err(LoanError::invalid_principal(principal, "must be a finite number"));
        }
        if principal <= 0.0 {
            return Err(LoanError::invalid_principal(principal, "must be greater than 0"));
        }
        if principal > self.max_principal {
            return Err(LoanError::invalid_principal(
                principal,
                format!("cannot exceed {}", self.max_principal),
            ));
        }

        let rate_ok = if self.allow_zero_rate {
            annual_rate_percent >= 0.0
        } else {
            annual_rate_percent > 0.0
        };
        let rate_in_range = rate_ok && annual_rate_percent <= self.max_rate_percent;
        if !annual_rate_percent.is_finite() || !rate_in_range {
            let lower = if self.allow_zero_rate { "at least 0%" } else { "greater than 0%" };
            return Err(LoanError::invalid_rate(
                annual_rate_percent,
                format!("must be {} and at most {}%", lower, self.max_rate_percent),
            ));
        }

        if term_years < Self::MIN_TERM_YEARS || term_years > self.max_term_years {
            return Err(LoanError::InvalidTerm {
                value: term_years,
                min: Self::MIN_TERM_YEARS,
                max: self.max_term_years,
            });
        }

        Ok(())
    }
}

/// Terms of a fixed-rate, monthly-paying loan.
///
/// # Example
///
/// ```rust
/// use loancast_loans::terms::LoanTerms;
///
/// let terms = LoanTerms::new(250_000.0, 5.5, 30).unwrap();
/// assert_eq!(terms.number_of_periods(), 360);
/// assert!((terms.monthly_payment() - 1419.47).abs() < 0.01);
///
/// assert!(LoanTerms::new(-1.0, 5.5, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerms {
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
}

impl LoanTerms {
    /// Creates loan terms checked against the default [`LoanBounds`].
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> LoanResult<Self> {
        Self::with_bounds(principal, annual_rate_percent, term_years, &LoanBounds::default())
    }

    /// Creates loan terms checked against custom bounds.
    pub fn with_bounds(
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        bounds: &LoanBounds,
    ) -> LoanResult<Self> {
        bounds.validate(principal, annual_rate_percent, term_years)?;
        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    /// Loan amount.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate in percent (5.5 means 5.5%).
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    /// Term in years.
    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Number of monthly payments (`term_years * 12`).
    pub fn number_of_periods(&self) -> u32 {
        number_of_periods(self.term_years)
    }

    /// Periodic (monthly) rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate_percent)
    }

    /// Fixed monthly payment.
    pub fn monthly_payment(&self) -> f64 {
        compute_monthly_payment(self.principal, self.annual_rate_percent, self.term_years)
    }

    /// Full amortization schedule.
    pub fn schedule(&self) -> AmortizationSchedule {
        generate_schedule(self.principal, self.annual_rate_percent, self.term_years)
    }

    /// Payment, total paid and total interest.
    pub fn totals(&self) -> LoanTotals {
        compute_totals(self.principal, self.annual_rate_percent, self.term_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(120_000.0, 4.25, 15).unwrap();
        assert_eq!(terms.principal(), 120_000.0);
        assert_eq!(terms.annual_rate_percent(), 4.25);
        assert_eq!(terms.term_years(), 15);
        assert_eq!(terms.number_of_periods(), 180);
        assert!((terms.monthly_rate() - 0.0425 / 12.0).abs() < 1e-15);
        assert_eq!(terms.schedule().len(), 180);
    }

    #[test]
    fn test_principal_bounds() {
        assert!(matches!(
            LoanTerms::new(0.0, 5.0, 10),
            Err(LoanError::InvalidPrincipal { .. })
        ));
        assert!(matches!(
            LoanTerms::new(10_000_000.01, 5.0, 10),
            Err(LoanError::InvalidPrincipal { .. })
        ));
        assert!(matches!(
            LoanTerms::new(f64::NAN, 5.0, 10),
            Err(LoanError::InvalidPrincipal { .. })
        ));
        assert!(LoanTerms::new(10_000_000.0, 5.0, 10).is_ok());
    }

    #[test]
    fn test_rate_bounds() {
        assert!(matches!(
            LoanTerms::new(1000.0, 0.0, 10),
            Err(LoanError::InvalidRate { .. })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, -1.0, 10),
            Err(LoanError::InvalidRate { .. })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, 30.5, 10),
            Err(LoanError::InvalidRate { .. })
        ));
        assert!(LoanTerms::new(1000.0, 30.0, 10).is_ok());
        assert!(LoanTerms::new(1000.0, 0.01, 10).is_ok());
    }

    #[test]
    fn test_term_bounds() {
        assert!(matches!(
            LoanTerms::new(1000.0, 5.0, 0),
            Err(LoanError::InvalidTerm { value: 0, min: 1, max: 50 })
        ));
        assert!(matches!(
            LoanTerms::new(1000.0, 5.0, 51),
            Err(LoanError::InvalidTerm { value: 51, .. })
        ));
        assert!(LoanTerms::new(1000.0, 5.0, 50).is_ok());
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = LoanBounds {
            allow_zero_rate: true,
            max_term_years: 10,
            ..LoanBounds::default()
        };

        let terms = LoanTerms::with_bounds(120_000.0, 0.0, 10, &bounds).unwrap();
        assert_eq!(terms.monthly_payment(), 1000.0);
        assert!(LoanTerms::with_bounds(120_000.0, 0.0, 11, &bounds).is_err());
        assert!(LoanTerms::with_bounds(120_000.0, -0.5, 5, &bounds).is_err());
    }

    #[test]
    fn test_rate_error_message() {
        let err = LoanTerms::new(1000.0, 45.0, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid interest rate 45%: must be greater than 0% and at most 30%"
        );
    }

    #[test]
    fn test_bounds_deserialize_with_defaults() {
        let bounds: LoanBounds = serde_json::from_str(r#"{"max_term_years": 40}"#).unwrap();
        assert_eq!(bounds.max_term_years, 40);
        assert_eq!(bounds.max_principal, 10_000_000.0);
        assert!(!bounds.allow_zero_rate);
    }
}
