//! The minimal indexed-container contract the reductions read through.
//!
//! A [`Container`] exposes an element count, a [`Shape`], and zero-based
//! element access. Reductions never mutate, resize, or allocate
//! container storage. Matrices are read as a flat multiset of elements in
//! storage order, which is all an order-independent statistic needs.
//!
//! Implemented for slices, arrays and `Vec` (reported as
//! [`Shape::Sequence`]) and, with the `nalgebra` feature, for
//! `DVector`, `RowDVector` and `DMatrix`.

use std::fmt;

/// The semantic shape of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A plain ordered sequence (`Vec`, slice, array).
    Sequence(usize),
    /// A column vector.
    Vector(usize),
    /// A row vector.
    RowVector(usize),
    /// A matrix; either dimension may be zero.
    Matrix {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },
}

impl Shape {
    /// Total number of elements.
    pub fn len(&self) -> usize {
        match *self {
            Shape::Sequence(n) | Shape::Vector(n) | Shape::RowVector(n) => n,
            Shape::Matrix { rows, cols } => rows * cols,
        }
    }

    /// Whether the shape holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Shape::Sequence(n) => write!(f, "sequence of length {n}"),
            Shape::Vector(n) => write!(f, "vector of length {n}"),
            Shape::RowVector(n) => write!(f, "row vector of length {n}"),
            Shape::Matrix { rows, cols } => write!(f, "{rows}x{cols} matrix"),
        }
    }
}

/// Read-only, indexable, sized storage.
///
/// # Example
///
/// ```rust
/// use fvar_stats::{Container, Shape};
///
/// let v = vec![1.0, 2.0, 3.0];
/// assert_eq!(v.shape(), Shape::Sequence(3));
/// assert_eq!(*Container::get(&v, 1), 2.0);
/// assert_eq!(v.iter().count(), 3);
/// ```
///
/// nalgebra matrices have inherent `shape`, `len`, `get` and `iter`
/// methods that win over this trait's under method-call syntax;
/// `m.shape()` on a `DMatrix` is nalgebra's `(rows, cols)` tuple. Call
/// through the trait there:
///
/// ```rust
/// # #[cfg(feature = "nalgebra")]
/// # {
/// use fvar_stats::{Container, Shape};
/// use nalgebra::DMatrix;
///
/// let m = DMatrix::<f64>::zeros(2, 3);
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(Container::shape(&m), Shape::Matrix { rows: 2, cols: 3 });
/// # }
/// ```
pub trait Container {
    /// Element type.
    type Elem;

    /// The container's shape.
    fn shape(&self) -> Shape;

    /// Element `i` in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    fn get(&self, i: usize) -> &Self::Elem;

    /// Number of elements.
    fn len(&self) -> usize {
        self.shape().len()
    }

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in storage order.
    fn iter(&self) -> impl Iterator<Item = &Self::Elem> + '_ {
        (0..Container::len(self)).map(move |i| self.get(i))
    }
}

impl<T> Container for [T] {
    type Elem = T;

    fn shape(&self) -> Shape {
        Shape::Sequence(<[T]>::len(self))
    }

    fn get(&self, i: usize) -> &T {
        &self[i]
    }
}

impl<T, const N: usize> Container for [T; N] {
    type Elem = T;

    fn shape(&self) -> Shape {
        Shape::Sequence(N)
    }

    fn get(&self, i: usize) -> &T {
        &self[i]
    }
}

impl<T> Container for Vec<T> {
    type Elem = T;

    fn shape(&self) -> Shape {
        Shape::Sequence(Vec::len(self))
    }

    fn get(&self, i: usize) -> &T {
        &self[i]
    }
}

#[cfg(feature = "nalgebra")]
mod linalg {
    use super::{Container, Shape};
    use nalgebra::{DMatrix, DVector, RowDVector, Scalar};

    impl<T: Scalar> Container for DVector<T> {
        type Elem = T;

        fn shape(&self) -> Shape {
            Shape::Vector(self.nrows())
        }

        fn get(&self, i: usize) -> &T {
            &self.as_slice()[i]
        }
    }

    impl<T: Scalar> Container for RowDVector<T> {
        type Elem = T;

        fn shape(&self) -> Shape {
            Shape::RowVector(self.ncols())
        }

        fn get(&self, i: usize) -> &T {
            &self.as_slice()[i]
        }
    }

    impl<T: Scalar> Container for DMatrix<T> {
        type Elem = T;

        fn shape(&self) -> Shape {
            Shape::Matrix {
                rows: self.nrows(),
                cols: self.ncols(),
            }
        }

        fn get(&self, i: usize) -> &T {
            &self.as_slice()[i]
        }
    }
}
