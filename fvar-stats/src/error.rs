//! Error types for the reductions.

use crate::container::Shape;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`StatsError`].
pub type Result<T> = std::result::Result<T, StatsError>;

/// The reductions that can reject their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Arithmetic mean.
    Mean,
    /// Sample variance.
    Variance,
    /// Sample standard deviation.
    Sd,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Statistic::Mean => "mean",
            Statistic::Variance => "variance",
            Statistic::Sd => "standard deviation",
        })
    }
}

/// Errors raised by the reductions.
///
/// There is a single kind: the statistic is undefined for the container
/// it was handed. It is raised before any arithmetic happens and is never
/// recovered from inside this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The container has no elements (a zero-length vector, or a matrix
    /// with zero rows or zero columns).
    #[error("cannot compute {statistic} of an empty container ({shape})")]
    EmptyContainer {
        /// The statistic that was requested
        statistic: Statistic,
        /// Shape of the offending container
        shape: Shape,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_statistic_and_container() {
        let err = StatsError::EmptyContainer {
            statistic: Statistic::Variance,
            shape: Shape::Matrix { rows: 0, cols: 3 },
        };
        assert_eq!(
            err.to_string(),
            "cannot compute variance of an empty container (0x3 matrix)"
        );

        let err = StatsError::EmptyContainer {
            statistic: Statistic::Sd,
            shape: Shape::RowVector(0),
        };
        assert_eq!(
            err.to_string(),
            "cannot compute standard deviation of an empty container (row vector of length 0)"
        );
    }
}
