//! Reverse-mode automatic differentiation on an explicit tape.
//!
//! **Part of the fvar workspace.** This crate is the reverse-mode
//! collaborator of `fvar-core`: a [`Var`] is an ordinary arithmetic
//! scalar (it implements [`fvar_core::Scalar`]) whose operations are
//! recorded on a [`Tape`] for a later backward pass.
//!
//! # Single-variable differentiation
//!
//! ```
//! use rev_tape::{reverse_diff, Var};
//!
//! let f = |x: Var<f64>| (x.clone() + 1.0) * (x - 1.0);
//!
//! let (val, deriv) = reverse_diff(f, 3.0);
//! assert_eq!(val, 8.0);    // f(3) = 8
//! assert_eq!(deriv, 6.0);  // f'(3) = 2x = 6
//! ```
//!
//! # Explicit tape management
//!
//! ```
//! use rev_tape::Var;
//!
//! let tape = Var::tape();
//! let x = Var::variable_on(tape, 3.0);
//! let y = x.clone() * x.clone();  // y = x²
//! y.backward();
//!
//! assert_eq!(y.value(), 9.0);
//! assert_eq!(x.grad(), 6.0);  // dy/dx = 2x = 6
//! ```
//!
//! # Forward over reverse
//!
//! Wrapping tracked values in an `Fvar` carries a forward tangent through
//! the same recorded computation; backpropagating that tangent yields a
//! second-order quantity:
//!
//! ```
//! use fvar_core::Fvar;
//! use num_traits::One;
//! use rev_tape::Var;
//!
//! let x = Var::variable_on(Var::tape(), 3.0);
//! let fx = Fvar::new(x.clone(), Var::one());
//! let y = fx.clone() * fx;          // y = x², y' = 2x
//!
//! assert_eq!(y.deriv.value(), 6.0);
//! y.deriv.backward();
//! assert_eq!(x.grad(), 2.0);        // d(2x)/dx
//! ```

pub mod tape;

pub use tape::{reverse_diff, reverse_gradient, Tape, Var};
