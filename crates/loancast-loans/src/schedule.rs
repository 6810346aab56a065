//! Amortization schedules for fixed-rate loans.
//!
//! Provides the period-by-period record produced by
//! [`generate_schedule`](crate::engine::generate_schedule).

use serde::{Deserialize, Serialize};

/// A single period of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Payment number, starting at 1
    pub period: u32,
    /// Total payment for the period
    pub payment: f64,
    /// Part of the payment that covers interest
    pub interest_portion: f64,
    /// Part of the payment that repays principal
    pub principal_portion: f64,
    /// Balance after the payment, never negative
    pub remaining_balance: f64,
}

/// Amortization schedule for a loan.
///
/// Entry `i` is period `i + 1`. The schedule remembers the original
/// principal, which is the balance at period 0.
///
/// # Example
///
/// ```
/// use loancast_loans::engine::generate_schedule;
///
/// let schedule = generate_schedule(120_000.0, 0.0, 10);
///
/// assert_eq!(schedule.len(), 120);
/// assert_eq!(schedule.balance_at(0), Some(120_000.0));
/// assert_eq!(schedule.final_balance(), 0.0);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    principal: f64,
    annual_rate_percent: f64,
    payment: f64,
    entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    /// Tolerance used by [`AmortizationSchedule::is_complete`].
    pub const CONSERVATION_TOLERANCE: f64 = 1e-6;

    pub(crate) fn new(
        principal: f64,
        annual_rate_percent: f64,
        payment: f64,
        entries: Vec<AmortizationEntry>,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            payment,
            entries,
        }
    }

    /// Original loan amount.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate in percent.
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    /// Fixed periodic payment.
    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// All entries in period order.
    pub fn entries(&self) -> &[AmortizationEntry] {
        &self.entries
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a schedule without periods.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last period number (0 for an empty schedule).
    pub fn last_period(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.period)
    }

    /// Iterates over entries in period order.
    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationEntry> {
        self.entries.iter()
    }

    /// Returns the entry for a 1-based period.
    pub fn entry(&self, period: u32) -> Option<&AmortizationEntry> {
        let idx = (period as usize).checked_sub(1)?;
        self.entries.get(idx)
    }

    /// Balance after the given period; period 0 is the principal.
    pub fn balance_at(&self, period: u32) -> Option<f64> {
        if period == 0 {
            return Some(self.principal);
        }
        self.entry(period).map(|e| e.remaining_balance)
    }

    /// Balance after the last period.
    pub fn final_balance(&self) -> f64 {
        self.entries
            .last()
            .map_or(self.principal, |e| e.remaining_balance)
    }

    /// Sum of principal repaid across all periods.
    pub fn total_principal(&self) -> f64 {
        compensated_sum(self.entries.iter().map(|e| e.principal_portion))
    }

    /// Sum of interest across all periods.
    pub fn total_interest(&self) -> f64 {
        compensated_sum(self.entries.iter().map(|e| e.interest_portion))
    }

    /// Sum of all payments.
    pub fn total_paid(&self) -> f64 {
        compensated_sum(self.entries.iter().map(|e| e.payment))
    }

    /// Validates that the principal repaid adds up to the loan amount within
    /// [`CONSERVATION_TOLERANCE`](Self::CONSERVATION_TOLERANCE), in currency
    /// units.
    pub fn is_complete(&self) -> bool {
        (self.total_principal() - self.principal).abs() <= Self::CONSERVATION_TOLERANCE
    }
}

/// Neumaier compensated summation.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;

    for value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }

    sum + compensation
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationEntry;
    type IntoIter = std::slice::Iter<'a, AmortizationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_period_schedule() -> AmortizationSchedule {
        AmortizationSchedule::new(
            200.0,
            12.0,
            103.0,
            vec![
                AmortizationEntry {
                    period: 1,
                    payment: 103.0,
                    interest_portion: 2.0,
                    principal_portion: 101.0,
                    remaining_balance: 99.0,
                },
                AmortizationEntry {
                    period: 2,
                    payment: 103.0,
                    interest_portion: 0.99,
                    principal_portion: 99.0,
                    remaining_balance: 0.0,
                },
            ],
        )
    }

    #[test]
    fn test_period_lookup() {
        let schedule = two_period_schedule();

        assert_eq!(schedule.entry(0), None);
        assert_eq!(schedule.entry(1).map(|e| e.period), Some(1));
        assert_eq!(schedule.entry(3), None);
        assert_eq!(schedule.balance_at(0), Some(200.0));
        assert_eq!(schedule.balance_at(1), Some(99.0));
        assert_eq!(schedule.balance_at(3), None);
        assert_eq!(schedule.last_period(), 2);
    }

    #[test]
    fn test_totals() {
        let schedule = two_period_schedule();

        assert!((schedule.total_principal() - 200.0).abs() < 1e-12);
        assert!((schedule.total_interest() - 2.99).abs() < 1e-12);
        assert!((schedule.total_paid() - 206.0).abs() < 1e-12);
        assert!(schedule.is_complete());
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_incomplete_schedule_detected() {
        let mut entries = two_period_schedule().entries().to_vec();
        entries[1].principal_portion = 99.0 + 2e-6;
        let schedule = AmortizationSchedule::new(200.0, 12.0, 103.0, entries);
        assert!(!schedule.is_complete());

        let mut entries = two_period_schedule().entries().to_vec();
        entries[1].principal_portion = 99.0 + 0.5e-6;
        let schedule = AmortizationSchedule::new(200.0, 12.0, 103.0, entries);
        assert!(schedule.is_complete());
    }

    #[test]
    fn test_compensated_sum() {
        let values = std::iter::once(1e7).chain(std::iter::repeat(1e-9).take(1000));
        assert!((compensated_sum(values) - (1e7 + 1e-6)).abs() < 1e-8);
        assert_eq!(compensated_sum(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_iteration_order() {
        let schedule = two_period_schedule();
        let periods: Vec<u32> = (&schedule).into_iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![1, 2]);
        assert_eq!(schedule.iter().count(), schedule.len());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = two_period_schedule().entries()[0];
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["period"], 1);
        assert_eq!(json["remaining_balance"], 99.0);
    }
}
