//! Balance forecasting from selected schedule periods.
//!
//! A [`SampleSelection`] picks periods out of an [`AmortizationSchedule`];
//! [`BalanceSamples`] turns them into `(period, balance)` points, and
//! [`BalanceForecaster`] fits a Newton polynomial through them to predict the
//! balance at any other period.

use loancast_math::interpolation::{DividedDifferenceTable, Interpolator, NewtonPolynomial};

use crate::error::{LoanError, LoanResult};
use crate::schedule::AmortizationSchedule;
use crate::selection::SampleSelection;

/// Default number of samples required before predicting.
pub const DEFAULT_MIN_SAMPLES: usize = 4;

/// `(period, balance)` points taken from a schedule.
///
/// The first point is always `(0, principal)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSamples {
    periods: Vec<f64>,
    balances: Vec<f64>,
}

impl BalanceSamples {
    /// Collects the selected periods from the schedule.
    ///
    /// Period 0 maps to the principal and is included whether or not it was
    /// selected; period `k >= 1` maps to the remaining balance after payment
    /// `k`.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::PeriodOutOfRange`] if a selected period is past
    /// the end of the schedule.
    pub fn from_selection(
        schedule: &AmortizationSchedule,
        selection: &SampleSelection,
    ) -> LoanResult<Self> {
        let mut periods = Vec::with_capacity(selection.len() + 1);
        let mut balances = Vec::with_capacity(selection.len() + 1);

        periods.push(0.0);
        balances.push(schedule.principal());

        for period in selection.iter().filter(|&p| p != 0) {
            let balance = schedule
                .balance_at(period)
                .ok_or(LoanError::PeriodOutOfRange {
                    period,
                    last: schedule.last_period(),
                })?;
            periods.push(f64::from(period));
            balances.push(balance);
        }

        Ok(Self { periods, balances })
    }

    /// Number of points, period 0 included.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false; period 0 is always present.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Sample periods (abscissas).
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Sample balances (ordinates).
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Iterates over `(period, balance)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.periods.iter().copied().zip(self.balances.iter().copied())
    }
}

/// Predicted balance together with the polynomial that produced it.
#[derive(Debug, Clone)]
pub struct BalancePrediction {
    /// Period the prediction is for.
    pub target_period: f64,
    /// Predicted remaining balance.
    pub balance: f64,
    /// Slope of the polynomial at the target: balance change per month,
    /// negative while the loan is being repaid.
    pub balance_change_per_month: f64,
    /// Interpolating polynomial through the samples.
    pub polynomial: NewtonPolynomial,
}

impl BalancePrediction {
    /// Degree of the interpolating polynomial.
    pub fn degree(&self) -> usize {
        self.polynomial.degree()
    }

    /// Divided-difference table behind the polynomial.
    pub fn table(&self) -> &DividedDifferenceTable {
        self.polynomial.table()
    }

    /// True when the target lies outside the sampled periods.
    pub fn is_extrapolation(&self) -> bool {
        !self.polynomial.in_range(self.target_period)
    }

    /// First and last sampled periods.
    pub fn sampled_range(&self) -> (f64, f64) {
        (self.polynomial.min_x(), self.polynomial.max_x())
    }
}

/// Fits Newton polynomials to balance samples.
///
/// Holds the minimum-sample policy; the interpolation itself accepts any
/// non-empty sample set.
///
/// # Example
///
/// ```rust
/// use loancast_loans::prelude::*;
///
/// let schedule = generate_schedule(100_000.0, 4.0, 10);
/// let selection = SampleSelection::from_periods([24, 48]);
/// let samples = BalanceSamples::from_selection(&schedule, &selection).unwrap();
///
/// // (0, principal), 24, 48: only three points
/// let err = BalanceForecaster::default().predict(&samples, 30.0).unwrap_err();
/// assert!(matches!(err, LoanError::InsufficientSamples { required: 4, actual: 3 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceForecaster {
    min_samples: usize,
}

impl Default for BalanceForecaster {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl BalanceForecaster {
    /// Creates a forecaster with the default minimum of 4 samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of samples (at least 1).
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples.max(1);
        self
    }

    /// Minimum number of samples required.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Builds the interpolating polynomial through the samples.
    ///
    /// # Errors
    ///
    /// - [`LoanError::InsufficientSamples`] below the minimum
    /// - [`LoanError::Interpolation`] if the table cannot be built
    pub fn fit(&self, samples: &BalanceSamples) -> LoanResult<NewtonPolynomial> {
        if samples.len() < self.min_samples {
            return Err(LoanError::InsufficientSamples {
                required: self.min_samples,
                actual: samples.len(),
            });
        }

        let polynomial =
            NewtonPolynomial::new(samples.periods().to_vec(), samples.balances().to_vec())?;
        tracing::debug!(
            samples = samples.len(),
            degree = polynomial.degree(),
            "fitted balance polynomial"
        );
        Ok(polynomial)
    }

    /// Predicts the balance at `target_period`.
    ///
    /// The target may lie outside the sampled range; such extrapolations are
    /// returned as computed and flagged by
    /// [`BalancePrediction::is_extrapolation`].
    pub fn predict(
        &self,
        samples: &BalanceSamples,
        target_period: f64,
    ) -> LoanResult<BalancePrediction> {
        let polynomial = self.fit(samples)?;
        let balance = polynomial.interpolate(target_period)?;
        let balance_change_per_month = polynomial.derivative(target_period)?;

        if !polynomial.in_range(target_period) {
            tracing::debug!(
                target_period,
                min = polynomial.min_x(),
                max = polynomial.max_x(),
                "extrapolating balance"
            );
        }
        tracing::debug!(target_period, balance, balance_change_per_month, "predicted balance");

        Ok(BalancePrediction {
            target_period,
            balance,
            balance_change_per_month,
            polynomial,
        })
    }
}
