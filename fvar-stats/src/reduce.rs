//! `sum`, `mean`, `variance` and `sd` over any [`Container`] of
//! [`Scalar`] elements.
//!
//! Each reduction is written once. With `f64` elements it is the ordinary
//! statistic; with `Fvar` elements the same code carries the tangent,
//! because every step is one of the dual-number operators. In particular
//! the variance tangent
//!
//! ```text
//! d var = (2 / (n-1)) Σ (xᵢ - x̄)(dxᵢ - dx̄)
//! ```
//!
//! includes the `dx̄` coupling term: the mean is itself a dual number, so
//! each deviation `xᵢ - x̄` already has tangent `dxᵢ - dx̄` before it is
//! squared.

use crate::container::Container;
use crate::error::{Result, Statistic};
use crate::guard::{self, NonEmpty};
use fvar_core::Scalar;
use num_traits::Zero;
use tracing::trace;

fn accumulate<C>(c: &C) -> C::Elem
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    c.iter().fold(C::Elem::zero(), |acc, x| acc + x.clone())
}

fn count<E: Scalar>(n: usize) -> E {
    E::from_f64(n as f64)
}

// Two-pass: the mean first, then squared deviations from it. Requires n >= 2.
fn sample_variance<C>(c: &C, n: usize) -> C::Elem
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    let mean = accumulate(c) / count(n);
    let squared_deviations = c.iter().fold(C::Elem::zero(), |acc, x| {
        let dev = x.clone() - mean.clone();
        acc + dev.clone() * dev
    });
    squared_deviations / count(n - 1)
}

// Exact equality of the innermost values. Rounding in `sum / n` can leave
// a residue of order 1e-34 in the variance of such data, so `sd` checks
// this before taking a square root.
fn all_primals_equal<C>(c: &C) -> bool
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    let mut primals = c.iter().map(Scalar::primal);
    match primals.next() {
        Some(first) => primals.all(|p| p == first),
        None => true,
    }
}

/// Sum of the elements.
///
/// An empty container sums to zero (value and tangent); this is not an
/// error. Elements are accumulated left to right in storage order.
///
/// # Example
///
/// ```rust
/// use fvar_core::Fvar;
/// use fvar_stats::sum;
///
/// assert_eq!(sum(&[1.0, 2.0, 3.0]), 6.0);
/// assert_eq!(sum(&Vec::<f64>::new()), 0.0);
///
/// let v = vec![Fvar::new(1.0, 1.0), Fvar::new(2.0, 2.0)];
/// assert_eq!(sum(&v), Fvar::new(3.0, 3.0));
/// ```
pub fn sum<C>(c: &C) -> C::Elem
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    trace!(shape = %c.shape(), size = ?guard::classify(c), "sum");
    accumulate(c)
}

/// Arithmetic mean, `sum / n`.
///
/// # Errors
///
/// [`StatsError::EmptyContainer`](crate::StatsError::EmptyContainer) when
/// the container is empty.
///
/// # Example
///
/// ```rust
/// use fvar_stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0);
/// assert!(mean(&Vec::<f64>::new()).is_err());
/// ```
pub fn mean<C>(c: &C) -> Result<C::Elem>
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    let size = guard::check_nonempty(Statistic::Mean, c)?;
    Ok(accumulate(c) / count(size.count()))
}

/// Sample variance with Bessel's correction, `Σ(xᵢ - x̄)² / (n - 1)`.
///
/// A single element has variance exactly zero, tangent included, whatever
/// tangent the element carries.
///
/// # Errors
///
/// [`StatsError::EmptyContainer`](crate::StatsError::EmptyContainer) when
/// the container is empty (for a matrix: zero rows or zero columns).
///
/// # Example
///
/// ```rust
/// use fvar_core::Fvar;
/// use fvar_stats::variance;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// assert_eq!(variance(&values).unwrap(), 3.5);
///
/// // Raising the first element's tangent lowers the variance tangent:
/// // the mean moves with it.
/// let tangents = [11.0, 2.0, 2.0, 2.0, 2.0, 2.0];
/// let v: Vec<Fvar<f64>> = values.iter().zip(tangents).map(|(&x, d)| Fvar::new(x, d)).collect();
/// let var = variance(&v).unwrap();
/// assert_eq!(var.value, 3.5);
/// assert!((var.deriv + 9.0).abs() < 1e-12);
/// ```
pub fn variance<C>(c: &C) -> Result<C::Elem>
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    Ok(match guard::check_nonempty(Statistic::Variance, c)? {
        NonEmpty::Singleton => C::Elem::zero(),
        NonEmpty::Many(n) => sample_variance(c, n),
    })
}

/// Sample standard deviation, `√variance`.
///
/// A single element, or a container whose elements are all equal, has
/// standard deviation exactly zero with a zero tangent. Those are the
/// points where `√` has no finite derivative.
///
/// # Errors
///
/// [`StatsError::EmptyContainer`](crate::StatsError::EmptyContainer) when
/// the container is empty.
///
/// # Example
///
/// ```rust
/// use fvar_core::Fvar;
/// use fvar_stats::sd;
///
/// let v = vec![Fvar::new(12.9, 4.0)];
/// assert_eq!(sd(&v).unwrap(), Fvar::new(0.0, 0.0));
/// ```
pub fn sd<C>(c: &C) -> Result<C::Elem>
where
    C: Container + ?Sized,
    C::Elem: Scalar,
{
    Ok(match guard::check_nonempty(Statistic::Sd, c)? {
        NonEmpty::Singleton => C::Elem::zero(),
        NonEmpty::Many(_) if all_primals_equal(c) => C::Elem::zero(),
        NonEmpty::Many(n) => {
            let var = sample_variance(c, n);
            if var.primal() == 0.0 {
                C::Elem::zero()
            } else {
                var.sqrt()
            }
        }
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use fvar_core::Fvar;
    use proptest::prelude::*;

    /// Paired (value, tangent) samples of a reasonable size.
    fn seeded_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((-100.0_f64..100.0, -10.0_f64..10.0), min_len..=max_len)
    }

    fn duals(pairs: &[(f64, f64)]) -> Vec<Fvar<f64>> {
        pairs.iter().map(|&(x, d)| Fvar::new(x, d)).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn sum_tangent_is_tangent_sum(pairs in seeded_vec(0, 40)) {
            let s = sum(&duals(&pairs));
            let expected: f64 = pairs.iter().map(|p| p.1).sum();
            prop_assert!((s.deriv - expected).abs() < 1e-9);
        }

        #[test]
        fn sd_squared_is_variance(pairs in seeded_vec(1, 40)) {
            let v = duals(&pairs);
            let var = variance(&v).unwrap();
            let s = sd(&v).unwrap();
            let tol = 1e-9 * (1.0 + var.value.abs());
            prop_assert!((s.value * s.value - var.value).abs() < tol);
        }

        #[test]
        fn variance_tangent_matches_finite_difference(pairs in seeded_vec(2, 30)) {
            let v = duals(&pairs);
            let tangent = variance(&v).unwrap().deriv;

            // Variance is quadratic, so the central difference is exact up
            // to rounding.
            let h = 1e-3;
            let shifted = |step: f64| -> f64 {
                let xs: Vec<f64> = pairs.iter().map(|&(x, d)| x + step * d).collect();
                variance(&xs).unwrap()
            };
            let numeric = (shifted(h) - shifted(-h)) / (2.0 * h);

            let tol = 1e-5 * (1.0 + tangent.abs());
            prop_assert!((tangent - numeric).abs() < tol, "{} vs {}", tangent, numeric);
        }

        #[test]
        fn variance_is_non_negative(pairs in seeded_vec(1, 40)) {
            let var = variance(&duals(&pairs)).unwrap();
            prop_assert!(var.value >= 0.0);
        }
    }
}
