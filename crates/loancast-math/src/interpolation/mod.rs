//! Polynomial interpolation through sampled loan balances.
//!
//! This module provides exact Newton divided-difference interpolation: the
//! resulting polynomial of degree `n - 1` passes through all `n` samples.
//!
//! # Available Types
//!
//! - [`DividedDifferenceTable`]: the triangular table of divided differences
//! - [`NewtonPolynomial`]: evaluation (and first derivative) in Newton form
//! - [`NewtonFormat`]: textual rendering of the Newton form
//!
//! # Choosing Samples
//!
//! | Samples | Degree | Behaviour |
//! |---------|--------|-----------|
//! | 1 | 0 | Constant |
//! | 2 | 1 | Linear |
//! | 4+ | 3+ | Captures the curvature of an amortizing balance |
//!
//! High degrees oscillate between widely spaced samples (Runge's
//! phenomenon). No degree reduction is performed.

mod format;
mod newton;

pub use format::{format_newton_polynomial, NewtonFormat, DEFAULT_MAX_TERMS, HIGHER_ORDER_MARKER};
pub use newton::{
    divided_difference_table, newton_evaluate, DividedDifferenceTable, NewtonPolynomial,
};

use crate::error::MathResult;

/// Trait for interpolation methods.
///
/// Implementors evaluate a function reconstructed from discrete samples.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    ///
    /// For a balance curve this is the instantaneous change per period.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x lies between the smallest and largest sample; a
    /// balance forecast outside it is an extrapolation.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
