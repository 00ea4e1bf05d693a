//! LU factorization with partial (row) pivoting, plus the triangular solves.

use log::trace;
use num_traits::Float;

use crate::{DenseMatrix, Error};

/// The factors of a square matrix `A` such that `P * A = L * U`.
///
/// `l` is unit lower-triangular, `u` upper-triangular and `p` a permutation
/// matrix. Each factor owns its storage; none aliases the input matrix.
#[derive(Clone, Debug)]
pub struct LuFactors<T> {
    pub l: DenseMatrix<T>,
    pub u: DenseMatrix<T>,
    pub p: DenseMatrix<T>,
}

impl<T: Float> LuFactors<T> {
    /// Factors `a` by Gaussian elimination with partial pivoting.
    ///
    /// At each step the remaining row with the largest-magnitude entry in the
    /// pivot column is moved into pivot position. A pivot of exactly zero
    /// means no row below can eliminate the column and the matrix is
    /// singular.
    pub fn decompose(a: &DenseMatrix<T>) -> Result<Self, Error> {
        if a.nrows() != a.ncols() {
            return Err(Error::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }

        let n = a.nrows();
        let mut l = DenseMatrix::identity(n);
        let mut u = a.clone();
        let mut p = DenseMatrix::identity(n);

        for i in 0..n {
            // find the pivot row for column i
            let mut pivot = i;
            for k in (i + 1)..n {
                if u[(k, i)].abs() > u[(pivot, i)].abs() {
                    pivot = k;
                }
            }
            if u[(pivot, i)] == T::zero() {
                return Err(Error::SingularMatrix { col: i });
            }

            if pivot != i {
                trace!("lu: pivot column {i}, swapping rows {i} and {pivot}");
                u.swap_rows(i, pivot);
                p.swap_rows(i, pivot);
                // In L only the multiplier columns 0..i take part in the
                // swap; the unit diagonal stays in place.
                for c in 0..i {
                    let tmp = l[(i, c)];
                    l[(i, c)] = l[(pivot, c)];
                    l[(pivot, c)] = tmp;
                }
            }

            for j in (i + 1)..n {
                let m = u[(j, i)] / u[(i, i)];
                l[(j, i)] = m;
                for k in i..n {
                    u[(j, k)] = u[(j, k)] - m * u[(i, k)];
                }
            }
        }

        Ok(LuFactors { l, u, p })
    }

    /// Solves `A * x = b` for the factored `A`, returning `x` as an `n` x 1
    /// matrix.
    ///
    /// The permutation is applied to `b` as an explicit product `P * b`
    /// before the forward substitution `L * y = P * b`; back substitution
    /// `U * x = y` then runs from the last row upward.
    pub fn solve(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, Error> {
        let n = self.u.nrows();
        if b.nrows() != n || b.ncols() != 1 {
            return Err(Error::DimensionMismatch {
                op: "solve",
                lhs_rows: n,
                lhs_cols: n,
                rhs_rows: b.nrows(),
                rhs_cols: b.ncols(),
            });
        }

        let pb = self.p.matmul(b)?;

        // forward substitution; L has a unit diagonal, which is never read
        let mut y = DenseMatrix::zeros(n, 1);
        for i in 0..n {
            let mut acc = pb[(i, 0)];
            for j in 0..i {
                acc = acc - self.l[(i, j)] * y[(j, 0)];
            }
            y[(i, 0)] = acc;
        }

        // back substitution
        let mut x = DenseMatrix::zeros(n, 1);
        for i in (0..n).rev() {
            let mut acc = y[(i, 0)];
            for j in (i + 1)..n {
                acc = acc - self.u[(i, j)] * x[(j, 0)];
            }
            let d = self.u[(i, i)];
            if d == T::zero() {
                return Err(Error::SingularMatrix { col: i });
            }
            x[(i, 0)] = acc / d;
        }

        Ok(x)
    }
}

/// Factors `a` and solves `a * x = b` in one call.
pub fn solve<T: Float>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, Error> {
    LuFactors::decompose(a)?.solve(b)
}
