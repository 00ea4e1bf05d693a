//! Function interpolation over sampled data.
//!
//! Two interpolants are provided: the Lagrange polynomial through all samples
//! and the natural cubic spline. The spline is fitted by assembling the
//! per-interval continuity system and solving it with the dense LU solver
//! from the `dense` crate. Node generation (`linspace`, Chebyshev) and
//! closest-sample selection sit alongside as small free functions.
//!
//! Samples are plain `(x, y)` pairs. The spline requires them sorted by
//! strictly increasing x; violations are reported as errors rather than
//! producing a garbage fit.

mod lagrange;
mod nodes;
mod spline;

pub use lagrange::lagrange_interpolate;
pub use nodes::{chebyshev_nodes, linspace, select_points, NodeStrategy};
pub use spline::{cubic_spline_interpolate, CubicSpline};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{op} needs at least {needed} points, got {got}")]
    InsufficientData {
        op: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("duplicate x-coordinate among samples (index {index})")]
    DuplicateAbscissa { index: usize },

    #[error("sample x-coordinates must be strictly increasing (violated at index {index})")]
    UnsortedAbscissa { index: usize },

    #[error(transparent)]
    Dense(#[from] dense::Error),
}
