//! Dual numbers for forward-mode automatic differentiation.
//!
//! An [`Fvar`] carries a value and its directional derivative (the
//! tangent) through arithmetic.
//!
//! # Mathematical Background
//!
//! A dual number has the form `a + a′·ε` where `ε² = 0`. Arithmetic on
//! dual numbers follows:
//!
//! - `(a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε`
//! - `(a + a′·ε) - (b + b′·ε) = (a-b) + (a′-b′)·ε`
//! - `(a + a′·ε) * (b + b′·ε) = ab + (a′b + ab′)·ε`
//! - `(a + a′·ε) / (b + b′·ε) = a/b + ((a′b - ab′)/b²)·ε`
//!
//! Every rule is written in terms of the inner type's own operators, so
//! the inner type may itself be an `Fvar` (second-order derivatives) or a
//! reverse-mode variable (forward-over-reverse). Nothing here knows which
//! one it is.
//!
//! # Example
//!
//! ```
//! use fvar_core::Fvar;
//!
//! // f(x) = (x + 1) / (x + 2) at x = 3
//! let x = Fvar::variable(3.0_f64);
//! let f = (x + 1.0) / (x + 2.0);
//!
//! assert_eq!(f.value, 0.8);
//! assert!((f.deriv - 0.04_f64).abs() < 1e-12); // 1/(x+2)²
//! ```

use crate::Scalar;
use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A dual number: a value and its tangent.
///
/// `Fvar { value, deriv }` represents `value + deriv·ε` where `ε² = 0`.
/// Both fields are public and always set together; after construction
/// the type is only changed by arithmetic (or by direct assignment to a
/// field while setting up inputs).
///
/// # Examples
///
/// Seeding an input and reading the derivative back:
///
/// ```
/// use fvar_core::Fvar;
///
/// let x = Fvar::variable(5.0);
/// let y = x * x;
///
/// assert_eq!(y.value, 25.0);
/// assert_eq!(y.deriv, 10.0);
/// ```
///
/// Seeding an arbitrary direction by assigning the tangent:
///
/// ```
/// use fvar_core::Fvar;
///
/// let mut x: Fvar<f64> = Fvar::from(2.0);
/// x.deriv = 3.0;
/// let y = x * x;
///
/// assert_eq!(y.deriv, 12.0); // 2x · 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fvar<T> {
    /// The value.
    pub value: T,
    /// The tangent.
    pub deriv: T,
}

impl<T> Fvar<T> {
    /// Create a dual number with explicit value and tangent.
    ///
    /// ```
    /// use fvar_core::Fvar;
    ///
    /// let d = Fvar::new(3.0, 1.0);
    /// assert_eq!(d.value, 3.0);
    /// assert_eq!(d.deriv, 1.0);
    /// ```
    pub fn new(value: T, deriv: T) -> Self {
        Fvar { value, deriv }
    }

    /// Create a constant (tangent = 0).
    pub fn constant(value: T) -> Self
    where
        T: Zero,
    {
        Fvar {
            value,
            deriv: T::zero(),
        }
    }

    /// Create the differentiation variable (tangent = 1).
    pub fn variable(value: T) -> Self
    where
        T: One,
    {
        Fvar {
            value,
            deriv: T::one(),
        }
    }
}

impl<T: Scalar> Fvar<T> {
    /// Reciprocal: `1/(b + b′·ε) = (1/b) + (-b′/b²)·ε`.
    ///
    /// ```
    /// use fvar_core::Fvar;
    ///
    /// let f = Fvar::variable(2.0).recip();
    /// assert_eq!(f.value, 0.5);
    /// assert_eq!(f.deriv, -0.25);
    /// ```
    pub fn recip(self) -> Self {
        let b = self.value;
        let b_squared = b.clone() * b.clone();
        Fvar {
            value: T::one() / b,
            deriv: -(self.deriv / b_squared),
        }
    }

    /// Square root: `√(a + a′·ε) = √a + (a′/(2√a))·ε`.
    ///
    /// The tangent is not finite at `a = 0`; callers that can reach zero
    /// must handle it before calling.
    ///
    /// ```
    /// use fvar_core::Fvar;
    ///
    /// let f = Fvar::variable(4.0).sqrt();
    /// assert_eq!(f.value, 2.0);
    /// assert_eq!(f.deriv, 0.25);
    /// ```
    pub fn sqrt(self) -> Self {
        let sqrt_val = self.value.sqrt();
        Fvar {
            value: sqrt_val.clone(),
            deriv: self.deriv / (sqrt_val.clone() + sqrt_val),
        }
    }

    /// Exponential: `e^(a + a′·ε) = e^a + (a′·e^a)·ε`.
    pub fn exp(self) -> Self {
        let exp_val = self.value.exp();
        Fvar {
            value: exp_val.clone(),
            deriv: self.deriv * exp_val,
        }
    }

    /// Natural logarithm: `ln(a + a′·ε) = ln(a) + (a′/a)·ε`.
    pub fn ln(self) -> Self {
        Fvar {
            value: self.value.clone().ln(),
            deriv: self.deriv / self.value,
        }
    }

    /// Sine: `sin(a + a′·ε) = sin(a) + (a′·cos(a))·ε`.
    pub fn sin(self) -> Self {
        Fvar {
            value: self.value.clone().sin(),
            deriv: self.deriv * self.value.cos(),
        }
    }

    /// Cosine: `cos(a + a′·ε) = cos(a) + (-a′·sin(a))·ε`.
    pub fn cos(self) -> Self {
        Fvar {
            value: self.value.clone().cos(),
            deriv: -self.deriv * self.value.sin(),
        }
    }
}

impl<T: Scalar> From<f64> for Fvar<T> {
    /// A plain number is a constant: its tangent is zero.
    fn from(v: f64) -> Self {
        Fvar::constant(T::from_f64(v))
    }
}

/// Addition: (a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε
impl<T: Add<Output = T>> Add for Fvar<T> {
    type Output = Fvar<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Fvar {
            value: self.value + rhs.value,
            deriv: self.deriv + rhs.deriv,
        }
    }
}

/// Subtraction: (a + a′·ε) - (b + b′·ε) = (a-b) + (a′-b′)·ε
impl<T: Sub<Output = T>> Sub for Fvar<T> {
    type Output = Fvar<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Fvar {
            value: self.value - rhs.value,
            deriv: self.deriv - rhs.deriv,
        }
    }
}

/// Multiplication: (a + a′·ε) * (b + b′·ε) = ab + (a′b + ab′)·ε
impl<T: Mul<Output = T> + Add<Output = T> + Clone> Mul for Fvar<T> {
    type Output = Fvar<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        Fvar {
            value: self.value.clone() * rhs.value.clone(),
            // Product rule: f′·g + f·g′
            deriv: self.deriv * rhs.value + self.value * rhs.deriv,
        }
    }
}

/// Division: (a + a′·ε) / (b + b′·ε) = a/b + ((a′b - ab′)/b²)·ε
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T> Div for Fvar<T>
where
    T: Mul<Output = T> + Sub<Output = T> + Div<Output = T> + Clone,
{
    type Output = Fvar<T>;

    fn div(self, rhs: Self) -> Self::Output {
        let b_squared = rhs.value.clone() * rhs.value.clone();
        Fvar {
            value: self.value.clone() / rhs.value.clone(),
            deriv: (self.deriv * rhs.value - self.value * rhs.deriv) / b_squared,
        }
    }
}

/// Negation: -(a + a′·ε) = -a + (-a′)·ε
impl<T: Neg<Output = T>> Neg for Fvar<T> {
    type Output = Fvar<T>;

    fn neg(self) -> Self::Output {
        Fvar {
            value: -self.value,
            deriv: -self.deriv,
        }
    }
}

// Mixed arithmetic with plain numbers: the `f64` operand is a constant.
macro_rules! impl_plain_operand {
    ( $( $Op:ident :: $op:ident ),+ ) => {
        $(
            impl<T: Scalar> $Op<f64> for Fvar<T> {
                type Output = Fvar<T>;

                fn $op(self, c: f64) -> Self::Output {
                    $Op::$op(self, Fvar::<T>::from(c))
                }
            }

            impl<T: Scalar> $Op<Fvar<T>> for f64 {
                type Output = Fvar<T>;

                fn $op(self, x: Fvar<T>) -> Self::Output {
                    $Op::$op(Fvar::<T>::from(self), x)
                }
            }
        )+
    };
}

impl_plain_operand!(Add::add, Sub::sub, Mul::mul, Div::div);

impl<T: Scalar> Zero for Fvar<T> {
    fn zero() -> Self {
        Fvar::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero() && self.deriv.is_zero()
    }
}

impl<T: Scalar> One for Fvar<T> {
    fn one() -> Self {
        Fvar::constant(T::one())
    }
}

impl<T: Scalar> Scalar for Fvar<T> {
    fn from_f64(v: f64) -> Self {
        Fvar::from(v)
    }

    fn primal(&self) -> f64 {
        self.value.primal()
    }

    fn sqrt(self) -> Self {
        Fvar::sqrt(self)
    }

    fn exp(self) -> Self {
        Fvar::exp(self)
    }

    fn ln(self) -> Self {
        Fvar::ln(self)
    }

    fn sin(self) -> Self {
        Fvar::sin(self)
    }

    fn cos(self) -> Self {
        Fvar::cos(self)
    }
}
