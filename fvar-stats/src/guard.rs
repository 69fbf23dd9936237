//! Size classification shared by every reduction.
//!
//! Each reduction asks the guard what it is dealing with before doing
//! any arithmetic. `sum` accepts every size; `mean`, `variance` and `sd`
//! go through [`check_nonempty`], which turns an empty container into a
//! [`StatsError::EmptyContainer`].

use crate::container::Container;
use crate::error::{Result, Statistic, StatsError};
use tracing::{debug, trace};

/// Size class of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// No elements.
    Empty,
    /// Exactly one element.
    Singleton,
    /// Two or more elements; carries the count.
    Many(usize),
}

impl Size {
    /// Classify an element count.
    pub fn of(n: usize) -> Self {
        match n {
            0 => Size::Empty,
            1 => Size::Singleton,
            n => Size::Many(n),
        }
    }
}

/// Size class of a container known to hold at least one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonEmpty {
    /// Exactly one element.
    Singleton,
    /// Two or more elements; carries the count.
    Many(usize),
}

impl NonEmpty {
    /// Number of elements.
    pub fn count(self) -> usize {
        match self {
            NonEmpty::Singleton => 1,
            NonEmpty::Many(n) => n,
        }
    }
}

/// Classify a container by its element count.
pub fn classify<C: Container + ?Sized>(c: &C) -> Size {
    Size::of(c.len())
}

/// Reject empty containers for `statistic`.
///
/// # Errors
///
/// [`StatsError::EmptyContainer`] when `c` has no elements, including a
/// matrix with zero rows or zero columns.
///
/// # Example
///
/// ```rust
/// use fvar_stats::guard::{check_nonempty, NonEmpty};
/// use fvar_stats::{Statistic, StatsError};
///
/// let v: Vec<f64> = vec![];
/// assert!(matches!(
///     check_nonempty(Statistic::Mean, &v),
///     Err(StatsError::EmptyContainer { .. })
/// ));
/// assert_eq!(check_nonempty(Statistic::Mean, &[1.0, 2.0]), Ok(NonEmpty::Many(2)));
/// ```
pub fn check_nonempty<C: Container + ?Sized>(statistic: Statistic, c: &C) -> Result<NonEmpty> {
    let shape = c.shape();
    let size = match classify(c) {
        Size::Empty => {
            debug!(%statistic, %shape, "rejecting empty container");
            return Err(StatsError::EmptyContainer { statistic, shape });
        }
        Size::Singleton => NonEmpty::Singleton,
        Size::Many(n) => NonEmpty::Many(n),
    };
    trace!(%statistic, %shape, ?size, "reducing");
    Ok(size)
}
