#![deny(missing_docs)]
//! # mcmc-analyze — split chains for convergence diagnostics
//!
//! Split-R̂ and effective sample size estimators treat each half of a
//! Markov chain as a chain of its own. [`split_chains`] cuts every chain
//! at the same point and hands the halves back as borrowed slices, so no
//! draw is copied.
//!
//! ```rust
//! use mcmc_analyze::split_chains;
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [5.0, 6.0, 7.0, 8.0];
//!
//! let halves = split_chains(&[&a[..], &b[..]], &[4, 4]).unwrap();
//! assert_eq!(halves, vec![&a[..2], &a[2..], &b[..2], &b[2..]]);
//! ```

pub mod error;
pub mod split;

pub use error::{Result, SplitError};
pub use split::{split_chains, split_chains_uniform};
