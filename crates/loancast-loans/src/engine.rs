//! Fixed-payment amortization engine.
//!
//! Pure functions of `(principal, annual_rate_percent, years)`. They assume
//! validated inputs and do not check them:
//!
//! - `principal > 0`
//! - `annual_rate_percent >= 0` (0 is handled as interest-free)
//! - `years > 0`
//!
//! Invalid inputs give meaningless results (possibly `NaN` or infinities)
//! rather than errors. Use [`LoanTerms`](crate::terms::LoanTerms) to enforce
//! the preconditions.
//!
//! No rounding is applied; rounding to cents is a display concern.

use serde::{Deserialize, Serialize};

use crate::schedule::{AmortizationEntry, AmortizationSchedule};

/// Payments per year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Relative size (to the principal) above which the residual absorbed by the
/// final payment is logged as a warning.
pub const SETTLEMENT_TOLERANCE: f64 = 1e-6;

/// Converts an annual percentage rate into the monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / f64::from(MONTHS_PER_YEAR)
}

/// Number of monthly payments over `years`.
pub fn number_of_periods(years: u32) -> u32 {
    years.saturating_mul(MONTHS_PER_YEAR)
}

/// Computes the fixed monthly payment.
///
/// With `r` the monthly rate and `N` the number of payments:
///
/// ```text
/// payment = principal * r * (1 + r)^N / ((1 + r)^N - 1)
/// ```
///
/// A rate of exactly zero falls back to `principal / N`.
///
/// # Example
///
/// ```rust
/// use loancast_loans::engine::compute_monthly_payment;
///
/// assert_eq!(compute_monthly_payment(120_000.0, 0.0, 10), 1000.0);
/// assert!((compute_monthly_payment(250_000.0, 5.5, 30) - 1419.47).abs() < 0.01);
/// ```
#[allow(clippy::float_cmp)]
pub fn compute_monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = f64::from(number_of_periods(years));

    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    principal * (r * growth) / (growth - 1.0)
}

/// Expands the loan into one entry per monthly period.
///
/// Each period charges interest on the running balance, applies the rest of
/// the payment to principal, and clamps a negative balance to zero.
///
/// The last payment retires exactly the outstanding balance: its
/// `principal_portion` is the balance carried into the period and its
/// `payment` is `interest_portion + principal_portion`. It differs from the
/// fixed payment only by the rounding residual of the recurrence, and the
/// final balance is exactly `0.0`.
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
) -> AmortizationSchedule {
    let payment = compute_monthly_payment(principal, annual_rate_percent, years);
    let r = monthly_rate(annual_rate_percent);
    let periods = number_of_periods(years);

    let mut entries = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 1..=periods {
        let interest_portion = balance * r;
        let mut principal_portion = payment - interest_portion;
        let mut period_payment = payment;

        if period == periods {
            report_residual(balance - principal_portion, principal);
            principal_portion = balance;
            period_payment = interest_portion + principal_portion;
            balance = 0.0;
        } else {
            balance -= principal_portion;
            if balance < 0.0 {
                balance = 0.0;
            }
        }

        entries.push(AmortizationEntry {
            period,
            payment: period_payment,
            interest_portion,
            principal_portion,
            remaining_balance: balance,
        });
    }

    tracing::debug!(
        principal,
        annual_rate_percent,
        years,
        payment,
        periods,
        "generated amortization schedule"
    );

    AmortizationSchedule::new(principal, annual_rate_percent, payment, entries)
}

/// Logs the balance the fixed payment would have left after the last period.
fn report_residual(residual: f64, principal: f64) {
    if residual.abs() > SETTLEMENT_TOLERANCE * principal.abs().max(1.0) {
        tracing::warn!(residual, principal, "large residual absorbed by final payment");
    } else {
        tracing::debug!(residual, "residual absorbed by final payment");
    }
}

/// Payment and lifetime totals of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTotals {
    /// Fixed monthly payment
    pub monthly_payment: f64,
    /// Sum of all payments (`monthly_payment * N`)
    pub total_paid: f64,
    /// Interest over the life of the loan (`total_paid - principal`)
    pub total_interest: f64,
    /// Number of monthly payments
    pub number_of_payments: u32,
}

/// Computes payment, total paid and total interest without building the
/// schedule.
pub fn compute_totals(principal: f64, annual_rate_percent: f64, years: u32) -> LoanTotals {
    let monthly_payment = compute_monthly_payment(principal, annual_rate_percent, years);
    let number_of_payments = number_of_periods(years);
    let total_paid = monthly_payment * f64::from(number_of_payments);

    LoanTotals {
        monthly_payment,
        total_paid,
        total_interest: total_paid - principal,
        number_of_payments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_payment() {
        assert_eq!(compute_monthly_payment(120_000.0, 0.0, 10), 1000.0);

        let schedule = generate_schedule(120_000.0, 0.0, 10);
        assert_eq!(schedule.len(), 120);
        assert_eq!(schedule.final_balance(), 0.0);
        for entry in &schedule {
            assert_eq!(entry.interest_portion, 0.0);
            assert_eq!(entry.principal_portion, 1000.0);
        }
    }

    #[test]
    fn test_known_mortgage_payment() {
        assert_relative_eq!(
            compute_monthly_payment(250_000.0, 5.5, 30),
            1419.47,
            epsilon = 0.01
        );
        assert_relative_eq!(
            compute_monthly_payment(200_000.0, 6.0, 30),
            1199.10,
            epsilon = 0.01
        );
        assert_relative_eq!(
            compute_monthly_payment(10_000.0, 12.0, 1),
            888.49,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_schedule_conservation() {
        for (principal, rate, years) in [
            (250_000.0, 5.5, 30),
            (120_000.0, 0.0, 10),
            (5_000.0, 29.99, 1),
            (10_000_000.0, 7.25, 50),
            (10_000_000.0, 30.0, 50),
            (1_000_000.0, 30.0, 50),
            (10_000_000.0, 0.01, 50),
            (1.0, 0.01, 1),
        ] {
            let schedule = generate_schedule(principal, rate, years);
            assert_abs_diff_eq!(schedule.total_principal(), principal, epsilon = 1e-6);
            assert!(schedule.is_complete(), "incomplete at {principal}/{rate}/{years}");
            assert_eq!(schedule.final_balance(), 0.0);
        }
    }

    #[test]
    fn test_last_row_retires_carried_balance() {
        for (principal, rate, years) in [
            (250_000.0, 5.5, 30),
            (10_000_000.0, 30.0, 50),
            (1_000_000.0, 30.0, 50),
        ] {
            let schedule = generate_schedule(principal, rate, years);
            let last_period = schedule.last_period();
            let carried = schedule.balance_at(last_period - 1).unwrap();
            let last = schedule.entry(last_period).unwrap();

            assert_eq!(carried - last.principal_portion, last.remaining_balance);
            assert_eq!(last.payment, last.interest_portion + last.principal_portion);
            assert_relative_eq!(last.payment, schedule.payment(), max_relative = 1e-5);
        }
    }

    #[test]
    fn test_every_row_reconciles() {
        let schedule = generate_schedule(10_000_000.0, 30.0, 50);

        let mut previous = schedule.principal();
        for entry in &schedule {
            assert_abs_diff_eq!(
                previous - entry.principal_portion,
                entry.remaining_balance,
                epsilon = 1e-6
            );
            assert_abs_diff_eq!(
                entry.interest_portion + entry.principal_portion,
                entry.payment,
                epsilon = 1e-6
            );
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn test_payment_at_rate_ceiling() {
        // 2.5% a month over 600 months: (1 + r)^N is about 2.7e6
        let payment = compute_monthly_payment(10_000_000.0, 30.0, 50);
        let r = monthly_rate(30.0);
        let growth = (1.0 + r).powf(600.0);
        assert_eq!(payment, 10_000_000.0 * (r * growth) / (growth - 1.0));
        assert!(payment > 250_000.0 && payment < 250_001.0);
    }

    #[test]
    fn test_balance_monotonic_and_settled() {
        let schedule = generate_schedule(250_000.0, 5.5, 30);

        let mut previous = schedule.principal();
        for entry in &schedule {
            assert!(
                entry.remaining_balance <= previous,
                "balance rose at period {}",
                entry.period
            );
            assert!(entry.remaining_balance >= 0.0);
            previous = entry.remaining_balance;
        }
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_first_period_split() {
        let schedule = generate_schedule(250_000.0, 5.5, 30);
        let first = schedule.entry(1).unwrap();

        assert_relative_eq!(first.interest_portion, 250_000.0 * 0.055 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(
            first.principal_portion,
            first.payment - first.interest_portion,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            first.remaining_balance,
            250_000.0 - first.principal_portion,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let a = generate_schedule(87_500.0, 3.875, 15);
        let b = generate_schedule(87_500.0, 3.875, 15);
        assert_eq!(a, b);
    }

    #[test]
    fn test_totals() {
        let totals = compute_totals(250_000.0, 5.5, 30);
        let payment = compute_monthly_payment(250_000.0, 5.5, 30);

        assert_eq!(totals.monthly_payment, payment);
        assert_eq!(totals.number_of_payments, 360);
        assert_eq!(totals.total_paid, payment * 360.0);
        assert_relative_eq!(totals.total_interest, totals.total_paid - 250_000.0, epsilon = 1e-9);
        assert!(totals.total_interest > 260_000.0 && totals.total_interest < 262_000.0);
    }

    #[test]
    fn test_zero_rate_totals() {
        let totals = compute_totals(120_000.0, 0.0, 10);
        assert_eq!(totals.total_paid, 120_000.0);
        assert_eq!(totals.total_interest, 0.0);
    }
}
