//! Error types for chain splitting.

use thiserror::Error;

/// Result type alias using [`SplitError`].
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors raised while splitting chains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// No chains were supplied.
    #[error("cannot split an empty set of chains")]
    NoChains,

    /// The number of declared sizes differs from the number of chains.
    #[error("got {sizes} chain sizes for {chains} chains")]
    SizeCountMismatch {
        /// Number of chains
        chains: usize,
        /// Number of sizes
        sizes: usize,
    },

    /// A chain holds fewer draws than its declared size.
    #[error("chain {chain} holds {len} draws but was declared with {declared}")]
    ShortChain {
        /// Index of the offending chain
        chain: usize,
        /// Draws actually present
        len: usize,
        /// Declared size
        declared: usize,
    },
}
