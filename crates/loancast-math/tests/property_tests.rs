//! Property-based tests for Newton interpolation invariants.
//!
//! - The polynomial passes through every sample
//! - Polynomial data is reproduced exactly when the degree suffices
//! - The table shape is triangular

use loancast_math::prelude::*;
use proptest::prelude::*;

/// Distinct, well-separated abscissas in shuffled order.
fn samples(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..=max_len)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(-1_000.0..1_000.0f64, n),
                prop::collection::vec(any::<prop::sample::Index>(), n),
            )
        })
        .prop_map(|(n, ys, swaps)| {
            let mut xs: Vec<f64> = (0..n).map(|i| i as f64 * 3.0).collect();
            for (i, idx) in swaps.iter().enumerate() {
                let j = idx.index(n);
                xs.swap(i, j);
            }
            (xs, ys)
        })
}

proptest! {
    #[test]
    fn passes_through_every_sample((xs, ys) in samples(8)) {
        let poly = NewtonPolynomial::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            let got = poly.evaluate(*x);
            prop_assert!((got - y).abs() < 1e-6, "P({}) = {}, expected {}", x, got, y);
        }
    }

    #[test]
    fn free_function_matches_polynomial((xs, ys) in samples(6), target in -10.0..30.0f64) {
        let poly = NewtonPolynomial::new(xs.clone(), ys.clone()).unwrap();
        let direct = newton_evaluate(&xs, &ys, target).unwrap();
        prop_assert_eq!(direct.to_bits(), poly.evaluate(target).to_bits());
    }

    #[test]
    fn reproduces_cubic(
        a in -5.0..5.0f64,
        b in -5.0..5.0f64,
        c in -5.0..5.0f64,
        d in -5.0..5.0f64,
    ) {
        let f = |x: f64| ((a * x + b) * x + c) * x + d;
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        let poly = NewtonPolynomial::new(xs, ys).unwrap();

        for t in [-2.0, 0.5, 2.5, 6.0] {
            prop_assert!((poly.evaluate(t) - f(t)).abs() < 1e-6);
        }
        prop_assert!(poly.table().coefficient(4).abs() < 1e-9);
    }

    #[test]
    fn table_is_triangular((xs, ys) in samples(8)) {
        let table = divided_difference_table(&xs, &ys).unwrap();
        let n = xs.len();
        for i in 0..n {
            prop_assert_eq!(table.row(i).len(), n - i);
            for j in 0..n {
                prop_assert_eq!(table.get(i, j).is_some(), i + j < n);
            }
        }
    }
}

#[test]
fn duplicate_abscissa_is_always_reported() {
    for dup in 1..5 {
        let mut xs: Vec<f64> = (0..5).map(f64::from).collect();
        xs[dup] = xs[0];
        let ys = vec![1.0; 5];
        assert!(matches!(
            divided_difference_table(&xs, &ys),
            Err(MathError::DuplicateAbscissa { .. })
        ));
    }
}
