//! # Loancast Math
//!
//! Numerical core for predicting loan balances from sparse samples.
//!
//! This crate provides:
//!
//! - **Divided differences**: [`DividedDifferenceTable`] built from arbitrary
//!   `(x, y)` samples with distinct abscissas
//! - **Newton form**: [`NewtonPolynomial`] evaluation and derivative
//! - **Formatting**: human-readable Newton-form rendering via [`NewtonFormat`]
//!
//! ## Design Philosophy
//!
//! - **Exact interpolation**: the polynomial passes through every sample
//! - **Fail loudly**: coincident abscissas are rejected, never smoothed over
//! - **Pure**: no shared state, every type is `Send + Sync`
//!
//! [`DividedDifferenceTable`]: interpolation::DividedDifferenceTable
//! [`NewtonPolynomial`]: interpolation::NewtonPolynomial
//! [`NewtonFormat`]: interpolation::NewtonFormat

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        divided_difference_table, format_newton_polynomial, newton_evaluate,
        DividedDifferenceTable, Interpolator, NewtonFormat, NewtonPolynomial,
    };
}

pub use error::{MathError, MathResult};
