#![deny(missing_docs)]
//! # fvar-core — forward-mode dual scalars
//!
//! This crate provides the scalar layer of the workspace:
//!
//! - [`Scalar`]: the arithmetic capability shared by every element type
//!   the statistics kernel accepts (plain floats, dual numbers, and
//!   reverse-mode variables from `rev-tape`)
//! - [`Fvar`]: a dual number `value + deriv·ε` generic over any
//!   [`Scalar`], so `Fvar<Fvar<f64>>` (second order) and
//!   `Fvar<Var<f64>>` (forward over reverse) come from the same code
//! - [`derivative`]: seed a variable, run a function once, read off the
//!   value and its derivative
//!
//! ## Quick start
//!
//! ```rust
//! use fvar_core::{derivative, Fvar};
//!
//! // f(x) = x² + 2x at x = 3
//! let (value, deriv) = derivative(|x: Fvar<f64>| x * x + 2.0 * x, 3.0);
//! assert_eq!(value, 15.0);
//! assert_eq!(deriv, 8.0);
//! ```
//!
//! ## Nesting
//!
//! Seeding both the outer and the inner tangent of an
//! `Fvar<Fvar<f64>>` yields the second derivative in `deriv.deriv`:
//!
//! ```rust
//! use fvar_core::Fvar;
//!
//! // f(x) = x³ at x = 2: f' = 12, f'' = 12
//! let x = Fvar::new(Fvar::variable(2.0), Fvar::constant(1.0));
//! let y = x.clone() * x.clone() * x;
//!
//! assert_eq!(y.value.value, 8.0);
//! assert_eq!(y.value.deriv, 12.0);
//! assert_eq!(y.deriv.value, 12.0);
//! assert_eq!(y.deriv.deriv, 12.0);
//! ```

use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub mod fvar;

pub use fvar::Fvar;

/// An **arithmetic scalar**: a type closed under `+ − × ÷` and negation,
/// with additive and multiplicative identities.
///
/// Anything implementing `Scalar` can be the element type of a reduction
/// and the inner type of an [`Fvar`]. The operators must follow the usual
/// chain-rule-consistent semantics; they are pure and never fail (domain
/// checks belong to callers).
///
/// # Example
///
/// ```rust
/// use fvar_core::{Fvar, Scalar};
///
/// fn square_plus_one<S: Scalar>(x: S) -> S {
///     x.clone() * x + S::one()
/// }
///
/// assert_eq!(square_plus_one(3.0_f64), 10.0);
///
/// let y = square_plus_one(Fvar::variable(3.0));
/// assert_eq!(y.value, 10.0);
/// assert_eq!(y.deriv, 6.0);
/// ```
pub trait Scalar:
    Clone
    + PartialEq
    + Debug
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lift a plain number; for dual types the tangent is zero.
    fn from_f64(v: f64) -> Self;

    /// The innermost plain value, looking through every dual and
    /// reverse-mode layer.
    fn primal(&self) -> f64;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Exponential.
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;
}

macro_rules! impl_float_scalar {
    ( $( $F:ty ),+ ) => {
        $(
            impl Scalar for $F {
                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $F
                }

                #[inline]
                fn primal(&self) -> f64 {
                    *self as f64
                }

                #[inline]
                fn sqrt(self) -> Self {
                    <$F>::sqrt(self)
                }

                #[inline]
                fn exp(self) -> Self {
                    <$F>::exp(self)
                }

                #[inline]
                fn ln(self) -> Self {
                    <$F>::ln(self)
                }

                #[inline]
                fn sin(self) -> Self {
                    <$F>::sin(self)
                }

                #[inline]
                fn cos(self) -> Self {
                    <$F>::cos(self)
                }
            }
        )+
    };
}

impl_float_scalar!(f32, f64);

/// Computes the value and derivative of `f` at `x` in one forward pass.
///
/// `x` is seeded as [`Fvar::variable`] (tangent 1); the result's value
/// and tangent are returned as `(f(x), f'(x))`.
///
/// # Examples
///
/// ```
/// use fvar_core::{derivative, Fvar, Scalar};
///
/// // f(x) = √x at x = 4
/// let (v, d) = derivative(|x: Fvar<f64>| x.sqrt(), 4.0);
/// assert_eq!(v, 2.0);
/// assert_eq!(d, 0.25);
/// ```
///
/// The same helper works one level up, giving a derivative whose
/// components are themselves duals:
///
/// ```
/// use fvar_core::{derivative, Fvar};
///
/// // f(x) = x² at x = Fvar(3, 1): f' = 2x carries d/dx(2x) = 2
/// let (v, d) = derivative(|x: Fvar<Fvar<f64>>| x.clone() * x, Fvar::variable(3.0));
/// assert_eq!(v, Fvar::new(9.0, 6.0));
/// assert_eq!(d, Fvar::new(6.0, 2.0));
/// ```
pub fn derivative<T, F>(f: F, x: T) -> (T, T)
where
    T: Scalar,
    F: FnOnce(Fvar<T>) -> Fvar<T>,
{
    let y = f(Fvar::variable(x));
    (y.value, y.deriv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic<S: Scalar>(x: S) -> S {
        x.clone() * x.clone() * x - S::from_f64(2.0) * S::one()
    }

    #[test]
    fn plain_floats_are_scalars() {
        assert_eq!(cubic(2.0_f64), 6.0);
        assert_eq!(cubic(2.0_f32), 6.0);
        assert_eq!(Scalar::primal(&1.5_f32), 1.5);
    }

    #[test]
    fn float_scalar_functions_match_std() {
        let x = 0.7_f64;
        assert_eq!(Scalar::sqrt(x), x.sqrt());
        assert_eq!(Scalar::exp(x), x.exp());
        assert_eq!(Scalar::ln(x), x.ln());
        assert_eq!(Scalar::sin(x), x.sin());
        assert_eq!(Scalar::cos(x), x.cos());
    }

    #[test]
    fn derivative_of_generic_function() {
        let (v, d) = derivative(cubic, 2.0);
        assert_eq!(v, 6.0);
        assert_eq!(d, 12.0); // 3x²
    }

    #[test]
    fn primal_looks_through_nesting() {
        let x: Fvar<Fvar<f64>> = Fvar::new(Fvar::new(4.5, 1.0), Fvar::new(2.0, 3.0));
        assert_eq!(x.primal(), 4.5);
    }
}
