#![deny(missing_docs)]
//! # fvar-stats — container statistics with exact tangents
//!
//! Generic reductions over vectors, row vectors, matrices and plain
//! sequences:
//!
//! - [`sum`]: never fails; an empty container sums to zero
//! - [`mean`]: `sum / n`
//! - [`variance`]: sample variance with Bessel's correction
//! - [`sd`]: sample standard deviation
//!
//! Each is written once against the [`Container`] trait and the
//! [`Scalar`](fvar_core::Scalar) capability, so the element type may be
//! `f64`, `Fvar<f64>`, `Fvar<Fvar<f64>>` or `Fvar<Var<f64>>`, and the
//! tangent of the result comes out of the same pass as its value.
//!
//! ## Quick start
//!
//! ```rust
//! use fvar_core::Fvar;
//! use fvar_stats::{sd, sum, variance};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let tangents = [1.0, 2.0, 2.0, 2.0, 2.0, 2.0];
//! let v: Vec<Fvar<f64>> = values
//!     .iter()
//!     .zip(tangents)
//!     .map(|(&x, d)| Fvar::new(x, d))
//!     .collect();
//!
//! assert_eq!(sum(&v), Fvar::new(21.0, 11.0));
//!
//! let var = variance(&v).unwrap();
//! assert!((var.value - 3.5).abs() < 1e-12);
//! assert!((var.deriv - 1.0).abs() < 1e-12);
//!
//! let s = sd(&v).unwrap();
//! assert!((s.value - 1.870_828_69).abs() < 1e-8);
//! assert!((s.deriv - 0.267_261_24).abs() < 1e-8);
//! ```
//!
//! ## Degenerate sizes
//!
//! | size | `sum` | `mean` | `variance` | `sd` |
//! |---|---|---|---|---|
//! | 0 | zero | error | error | error |
//! | 1 | the element | the element | zero | zero |
//!
//! A matrix with zero rows or zero columns is empty.
//!
//! ## Features
//!
//! - `nalgebra` (default): [`Container`] impls for `DVector`,
//!   `RowDVector` and `DMatrix`.

pub mod container;
pub mod error;
pub mod guard;
pub mod reduce;

pub use container::{Container, Shape};
pub use error::{Result, Statistic, StatsError};
pub use reduce::{mean, sd, sum, variance};
