use std::ops::{Index, IndexMut};

use num_traits::Float;

use crate::Error;

/// Row-major dense matrix over a floating-point scalar.
///
/// The shape is fixed at construction. Storage is a single owned `Vec`, so
/// `clone` is always a deep copy and [`DenseMatrix::swap_rows`] exchanges
/// values rather than references.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: Float> DenseMatrix<T> {
    /// Creates an `nrows` x `ncols` matrix with every element set to `fill`.
    pub fn filled(nrows: usize, ncols: usize, fill: T) -> Self {
        assert!(nrows > 0 && ncols > 0, "matrix must have a nonzero shape");
        DenseMatrix {
            nrows,
            ncols,
            data: vec![fill; nrows * ncols],
        }
    }

    /// Creates an `nrows` x `ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::filled(nrows, ncols, T::zero())
    }

    /// Creates an `n` x `n` matrix with `value` on the diagonal, zero elsewhere.
    pub fn diagonal(n: usize, value: T) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = value;
        }
        m
    }

    /// Creates the `n` x `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::diagonal(n, T::one())
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Panics if `rows` is empty or ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        assert!(!rows.is_empty(), "matrix must have at least one row");
        let ncols = rows[0].len();
        assert!(ncols > 0, "matrix must have at least one column");
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for row in rows {
            assert_eq!(row.len(), ncols, "all rows must have equal length");
            data.extend_from_slice(row);
        }
        DenseMatrix {
            nrows: rows.len(),
            ncols,
            data,
        }
    }

    /// Builds an `n` x 1 column vector from a slice.
    pub fn from_column(values: &[T]) -> Self {
        assert!(!values.is_empty(), "vector must have at least one element");
        DenseMatrix {
            nrows: values.len(),
            ncols: 1,
            data: values.to_vec(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.nrows, "row index out of bounds");
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Mutable view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.nrows, "row index out of bounds");
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// The elements of a single-column matrix as a contiguous slice.
    ///
    /// This is the scalar-per-row view of an `n` x 1 solution vector. Panics
    /// when the matrix has more than one column; use [`DenseMatrix::row`] for
    /// general matrices.
    pub fn as_vector(&self) -> &[T] {
        assert_eq!(self.ncols, 1, "as_vector requires a single-column matrix");
        &self.data
    }

    /// Elementwise sum. Shapes must match exactly.
    pub fn add(&self, rhs: &Self) -> Result<Self, Error> {
        self.zip_with(rhs, "addition", |a, b| a + b)
    }

    /// Elementwise difference. Shapes must match exactly.
    pub fn sub(&self, rhs: &Self) -> Result<Self, Error> {
        self.zip_with(rhs, "subtraction", |a, b| a - b)
    }

    fn zip_with(&self, rhs: &Self, op: &'static str, f: impl Fn(T, T) -> T) -> Result<Self, Error> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            return Err(Error::DimensionMismatch {
                op,
                lhs_rows: self.nrows,
                lhs_cols: self.ncols,
                rhs_rows: rhs.nrows,
                rhs_cols: rhs.ncols,
            });
        }
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(DenseMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data,
        })
    }

    /// Multiplies every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        DenseMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(|&a| a * k).collect(),
        }
    }

    /// Standard matrix product, O(r * c * k).
    pub fn matmul(&self, rhs: &Self) -> Result<Self, Error> {
        if self.ncols != rhs.nrows {
            return Err(Error::DimensionMismatch {
                op: "multiplication",
                lhs_rows: self.nrows,
                lhs_cols: self.ncols,
                rhs_rows: rhs.nrows,
                rhs_cols: rhs.ncols,
            });
        }
        let mut out = Self::zeros(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let mut acc = T::zero();
                for k in 0..self.ncols {
                    acc = acc + self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = acc;
            }
        }
        Ok(out)
    }

    /// All elements in row-major order, consuming the matrix.
    pub fn flatten(self) -> Vec<T> {
        self.data
    }

    /// Exchanges rows `i` and `j` by value.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        assert!(i < self.nrows && j < self.nrows, "row index out of bounds");
        if i == j {
            return;
        }
        let ncols = self.ncols;
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.data.split_at_mut(hi * ncols);
        head[lo * ncols..(lo + 1) * ncols].swap_with_slice(&mut tail[..ncols]);
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.nrows && j < self.ncols, "index out of bounds");
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.nrows && j < self.ncols, "index out of bounds");
        &mut self.data[i * self.ncols + j]
    }
}
