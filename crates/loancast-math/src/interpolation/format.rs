//! Human-readable rendering of a Newton-form polynomial.

use std::fmt::Write as _;

use crate::interpolation::newton::{DividedDifferenceTable, NewtonPolynomial};

/// Default number of displayed terms (constant included).
pub const DEFAULT_MAX_TERMS: usize = 4;

/// Marker appended when terms are cut off.
pub const HIGHER_ORDER_MARKER: &str = " + ... (higher order terms)";

/// Rendering options for the Newton form.
///
/// Purely presentational: it reads coefficients and abscissas straight from
/// the table and never recomputes anything.
///
/// # Example
///
/// ```rust
/// use loancast_math::interpolation::{DividedDifferenceTable, NewtonFormat};
///
/// let table = DividedDifferenceTable::new(
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 2.0, 5.0],
/// ).unwrap();
///
/// assert_eq!(
///     NewtonFormat::default().render(&table),
///     "P(x) = 1.00 + (1.0000)(x - 0) + (1.0000)(x - 0)(x - 1)"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewtonFormat {
    max_terms: usize,
    constant_precision: usize,
    coefficient_precision: usize,
    abscissa_precision: usize,
}

impl Default for NewtonFormat {
    fn default() -> Self {
        Self {
            max_terms: DEFAULT_MAX_TERMS,
            constant_precision: 2,
            coefficient_precision: 4,
            abscissa_precision: 0,
        }
    }
}

impl NewtonFormat {
    /// Creates the default format (4 terms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many terms to show, constant included. Values below 1 are
    /// treated as 1.
    #[must_use]
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms.max(1);
        self
    }

    /// Sets decimals for the constant term.
    #[must_use]
    pub fn with_constant_precision(mut self, precision: usize) -> Self {
        self.constant_precision = precision;
        self
    }

    /// Sets decimals for the higher-order coefficients.
    #[must_use]
    pub fn with_coefficient_precision(mut self, precision: usize) -> Self {
        self.coefficient_precision = precision;
        self
    }

    /// Sets decimals for the abscissas inside `(x - x_k)`.
    #[must_use]
    pub fn with_abscissa_precision(mut self, precision: usize) -> Self {
        self.abscissa_precision = precision;
        self
    }

    /// Number of terms shown, constant included.
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    /// Renders `P(x) = c0 + (c1)(x - x0) + (c2)(x - x0)(x - x1) ...`.
    pub fn render(&self, table: &DividedDifferenceTable) -> String {
        let xs = table.abscissas();
        let n = table.len();

        let mut out = format!(
            "P(x) = {:.prec$}",
            table.coefficient(0),
            prec = self.constant_precision
        );

        for i in 1..self.max_terms.min(n) {
            let _ = write!(
                out,
                " + ({:.prec$})",
                table.coefficient(i),
                prec = self.coefficient_precision
            );
            for x in &xs[..i] {
                let _ = write!(out, "(x - {:.prec$})", x, prec = self.abscissa_precision);
            }
        }

        if n > self.max_terms {
            out.push_str(HIGHER_ORDER_MARKER);
        }

        out
    }
}

/// Renders the table's polynomial with the default [`NewtonFormat`].
pub fn format_newton_polynomial(table: &DividedDifferenceTable) -> String {
    NewtonFormat::default().render(table)
}

impl std::fmt::Display for NewtonPolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_newton_polynomial(self.table()))
    }
}
