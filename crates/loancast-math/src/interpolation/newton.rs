//! Newton divided-difference interpolation.

use ndarray::Array2;

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Triangular table of Newton divided differences.
///
/// For `n` samples the table is an `n x n` matrix where cell `[i][0]` holds
/// `y_i` and cell `[i][j]` (for `j >= 1`) holds the j-th order divided
/// difference `f[x_i, ..., x_{i+j}]`. Only cells with `i + j < n` are
/// defined; the upper-right triangle is stored as zero and reported as
/// `None` by [`DividedDifferenceTable::get`].
///
/// The Newton coefficients are the first row of the table.
///
/// # Example
///
/// ```rust
/// use loancast_math::interpolation::DividedDifferenceTable;
///
/// // y = x^2 + 1
/// let table = DividedDifferenceTable::new(
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 2.0, 5.0, 10.0],
/// ).unwrap();
///
/// assert_eq!(table.coefficients(), vec![1.0, 1.0, 1.0, 0.0]);
/// assert_eq!(table.get(3, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DividedDifferenceTable {
    xs: Vec<f64>,
    table: Array2<f64>,
}

impl DividedDifferenceTable {
    /// Builds the divided-difference table.
    ///
    /// Samples need not be sorted. Columns are filled in increasing order,
    /// each cell depending only on the previous column:
    ///
    /// ```text
    /// t[i][j] = (t[i+1][j-1] - t[i][j-1]) / (x[i+j] - x[i])
    /// ```
    ///
    /// # Errors
    ///
    /// - [`MathError::InsufficientData`] if there are no samples
    /// - [`MathError::InvalidInput`] if lengths differ or a value is not finite
    /// - [`MathError::DuplicateAbscissa`] if two x values coincide
    #[allow(clippy::float_cmp)]
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(i) = xs.iter().chain(ys.iter()).position(|v| !v.is_finite()) {
            let (axis, idx) = if i < xs.len() { ("x", i) } else { ("y", i - xs.len()) };
            return Err(MathError::invalid_input(format!(
                "non-finite {} value at index {}",
                axis, idx
            )));
        }

        let n = xs.len();
        let mut table = Array2::<f64>::zeros((n, n));
        for (i, &y) in ys.iter().enumerate() {
            table[[i, 0]] = y;
        }

        for j in 1..n {
            for i in 0..n - j {
                let span = xs[i + j] - xs[i];
                if span == 0.0 {
                    return Err(MathError::duplicate_abscissa(xs[i], i, i + j));
                }
                table[[i, j]] = (table[[i + 1, j - 1]] - table[[i, j - 1]]) / span;
            }
        }

        tracing::debug!(samples = n, "built divided-difference table");

        Ok(Self { xs, table })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false; a table holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Degree of the interpolating polynomial (`n - 1`).
    pub fn degree(&self) -> usize {
        self.len() - 1
    }

    /// The abscissas the table was built from, in the caller's order.
    pub fn abscissas(&self) -> &[f64] {
        &self.xs
    }

    /// Returns cell `[i][j]`, or `None` when `i + j >= n`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i + j < self.len() {
            Some(self.table[[i, j]])
        } else {
            None
        }
    }

    /// The k-th Newton coefficient, `f[x_0, ..., x_k]`.
    pub fn coefficient(&self, k: usize) -> f64 {
        self.table[[0, k]]
    }

    /// All Newton coefficients (row 0 of the table).
    pub fn coefficients(&self) -> Vec<f64> {
        self.table.row(0).to_vec()
    }

    /// The defined cells of row `i`: `f[x_i]`, `f[x_i, x_{i+1}]`, ...
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.len().saturating_sub(i))
            .map(|j| self.table[[i, j]])
            .collect()
    }

    /// The full square matrix, including the zeroed upper-right triangle.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.table
    }
}

/// Builds a [`DividedDifferenceTable`] from borrowed samples.
pub fn divided_difference_table(xs: &[f64], ys: &[f64]) -> MathResult<DividedDifferenceTable> {
    DividedDifferenceTable::new(xs.to_vec(), ys.to_vec())
}

/// Interpolating polynomial in Newton form.
///
/// Passes exactly (up to rounding) through every sample it was built from.
/// Extrapolation is always allowed since predicting balances outside the
/// sampled periods is the intended use.
///
/// # Example
///
/// ```rust
/// use loancast_math::interpolation::NewtonPolynomial;
///
/// let poly = NewtonPolynomial::new(
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 2.0, 5.0, 10.0],
/// ).unwrap();
///
/// assert!((poly.evaluate(4.0) - 17.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonPolynomial {
    table: DividedDifferenceTable,
}

impl NewtonPolynomial {
    /// Creates the interpolating polynomial through `(xs[i], ys[i])`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Ok(Self::from_table(DividedDifferenceTable::new(xs, ys)?))
    }

    /// Wraps an already-built table.
    pub fn from_table(table: DividedDifferenceTable) -> Self {
        Self { table }
    }

    /// The underlying divided-difference table.
    pub fn table(&self) -> &DividedDifferenceTable {
        &self.table
    }

    /// Degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.table.degree()
    }

    /// Evaluates the polynomial at `x`.
    ///
    /// Accumulates the running basis product incrementally:
    ///
    /// ```text
    /// result = c0
    /// term   = 1
    /// for i in 1..n:
    ///     term   *= x - x[i-1]
    ///     result += c[i] * term
    /// ```
    ///
    /// The order of accumulation is fixed; reordering would change rounding
    /// in the last bits but not the polynomial.
    pub fn evaluate(&self, x: f64) -> f64 {
        let xs = self.table.abscissas();
        let mut result = self.table.coefficient(0);
        let mut term = 1.0;
        for i in 1..xs.len() {
            term *= x - xs[i - 1];
            result += self.table.coefficient(i) * term;
        }
        result
    }

    /// First derivative at `x`, carried alongside the same running product.
    pub fn evaluate_derivative(&self, x: f64) -> f64 {
        let xs = self.table.abscissas();
        let mut result = 0.0;
        let mut term = 1.0;
        let mut d_term = 0.0;
        for i in 1..xs.len() {
            d_term = d_term * (x - xs[i - 1]) + term;
            term *= x - xs[i - 1];
            result += self.table.coefficient(i) * d_term;
        }
        result
    }
}

impl Interpolator for NewtonPolynomial {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(self.evaluate(x))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        Ok(self.evaluate_derivative(x))
    }

    fn allows_extrapolation(&self) -> bool {
        true
    }

    fn min_x(&self) -> f64 {
        self.table
            .abscissas()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    fn max_x(&self) -> f64 {
        self.table
            .abscissas()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Evaluates the Newton interpolating polynomial through `(xs, ys)` at `target`.
///
/// Builds a fresh table on every call; keep a [`NewtonPolynomial`] around to
/// evaluate many targets.
pub fn newton_evaluate(xs: &[f64], ys: &[f64], target: f64) -> MathResult<f64> {
    let table = divided_difference_table(xs, ys)?;
    Ok(NewtonPolynomial::from_table(table).evaluate(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_recovery() {
        // y = x^2 + 1
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 2.0, 5.0, 10.0];

        assert_relative_eq!(newton_evaluate(&xs, &ys, 4.0).unwrap(), 17.0, epsilon = 1e-6);
        assert_relative_eq!(newton_evaluate(&xs, &ys, 5.0).unwrap(), 26.0, epsilon = 1e-6);
        assert_relative_eq!(newton_evaluate(&xs, &ys, 1.5).unwrap(), 3.25, epsilon = 1e-10);
    }

    #[test]
    fn test_table_values() {
        let table =
            divided_difference_table(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 5.0, 10.0]).unwrap();

        assert_eq!(table.row(0), vec![1.0, 1.0, 1.0, 0.0]);
        assert_eq!(table.row(1), vec![2.0, 3.0, 1.0]);
        assert_eq!(table.row(2), vec![5.0, 5.0]);
        assert_eq!(table.row(3), vec![10.0]);
        assert_eq!(table.degree(), 3);
    }

    #[test]
    fn test_table_shape() {
        for n in 1..=7 {
            let xs: Vec<f64> = (0..n).map(|i| f64::from(i) * 12.0).collect();
            let ys: Vec<f64> = (0..n).map(|i| 1000.0 - f64::from(i * i)).collect();
            let table = DividedDifferenceTable::new(xs, ys).unwrap();
            let n = n as usize;

            assert_eq!(table.as_array().dim(), (n, n));
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(table.get(i, j).is_some(), i + j < n, "cell [{}][{}]", i, j);
                }
            }
        }
    }

    #[test]
    fn test_upper_triangle_zeroed() {
        let table = divided_difference_table(&[0.0, 1.0, 2.0], &[3.0, 7.0, 4.0]).unwrap();
        let raw = table.as_array();
        assert_eq!(raw[[1, 2]], 0.0);
        assert_eq!(raw[[2, 1]], 0.0);
        assert_eq!(raw[[2, 2]], 0.0);
    }

    #[test]
    fn test_duplicate_abscissa_rejected() {
        let err = divided_difference_table(&[5.0, 5.0, 7.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, MathError::duplicate_abscissa(5.0, 0, 1));
    }

    #[test]
    fn test_non_adjacent_duplicate_rejected() {
        let err =
            divided_difference_table(&[1.0, 4.0, 9.0, 4.0], &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(matches!(
            err,
            MathError::DuplicateAbscissa { first: 1, second: 3, .. }
        ));
        assert!(newton_evaluate(&[2.0, 2.0], &[1.0, 1.0], 3.0).is_err());
    }

    #[test]
    fn test_passes_through_unsorted_samples() {
        let xs = [24.0, 0.0, 60.0, 12.0, 36.0];
        let ys = [91_200.0, 100_000.0, 76_450.0, 95_700.0, 86_300.0];
        let poly = NewtonPolynomial::new(xs.to_vec(), ys.to_vec()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(poly.evaluate(*x), *y, epsilon = 1e-6);
        }
        assert_eq!(poly.min_x(), 0.0);
        assert_eq!(poly.max_x(), 60.0);
    }

    #[test]
    fn test_single_point_is_constant() {
        let poly = NewtonPolynomial::new(vec![3.0], vec![42.0]).unwrap();
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.evaluate(-100.0), 42.0);
        assert_eq!(poly.evaluate(1e6), 42.0);
        assert_eq!(poly.evaluate_derivative(7.0), 0.0);
    }

    #[test]
    fn test_two_points_linear() {
        let poly = NewtonPolynomial::new(vec![0.0, 10.0], vec![100.0, 50.0]).unwrap();
        assert_relative_eq!(poly.evaluate(5.0), 75.0, epsilon = 1e-12);
        assert_relative_eq!(poly.evaluate(20.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(poly.evaluate_derivative(3.0), -5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_degree_reduction() {
        // Collinear samples: higher coefficients vanish but are still carried.
        let table = divided_difference_table(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
        assert_eq!(table.degree(), 3);
        assert_eq!(table.coefficients().len(), 4);
    }

    #[test]
    fn test_input_validation() {
        assert!(matches!(
            divided_difference_table(&[], &[]),
            Err(MathError::InsufficientData { required: 1, actual: 0 })
        ));
        assert!(matches!(
            divided_difference_table(&[0.0, 1.0], &[1.0]),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            divided_difference_table(&[0.0, f64::NAN], &[1.0, 2.0]),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            divided_difference_table(&[0.0, 1.0], &[1.0, f64::INFINITY]),
            Err(MathError::InvalidInput { .. })
        ));
    }
}
