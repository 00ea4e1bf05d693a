//! Dense real-valued matrices and a direct LU linear solver.
//!
//! The matrix type owns its storage outright; row swaps move values, so two
//! matrices can never end up sharing a row. This is what makes it safe to
//! mirror a pivot swap across the L, U and P factors independently.

mod lu;
mod matrix;

pub use lu::{solve, LuFactors};
pub use matrix::DenseMatrix;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("dimension mismatch in {op}: {lhs_rows}x{lhs_cols} vs {rhs_rows}x{rhs_cols}")]
    DimensionMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    #[error("LU factorization requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("a singular matrix was encountered during LU factorization (pivot column {col})")]
    SingularMatrix { col: usize },
}
