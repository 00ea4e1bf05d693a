//! Natural cubic-spline fitting and evaluation.
//!
//! For k subintervals the fit assembles a 4k x 4k linear system over the
//! local cubic coefficients `a0 + a1*h + a2*h^2 + a3*h^3` (h measured from
//! the left knot of each subinterval): two value rows per subinterval, first-
//! and second-derivative continuity rows at each interior knot, and the two
//! natural boundary rows forcing zero curvature at the domain ends. The
//! system is solved with the LU solver from the `dense` crate.

use dense::DenseMatrix;
use log::debug;
use num_traits::Float;

use crate::Error;

/// A natural cubic spline fitted to ordered samples.
#[derive(Clone, Debug)]
pub struct CubicSpline<T> {
    samples: Vec<(T, T)>,
    coeffs: Vec<T>,
}

impl<T: Float> CubicSpline<T> {
    /// Fits a natural cubic spline through `samples`.
    ///
    /// The samples must be sorted by strictly increasing x; equal adjacent
    /// x-coordinates are reported as [`Error::DuplicateAbscissa`] and
    /// decreasing ones as [`Error::UnsortedAbscissa`]. At least two samples
    /// are required.
    pub fn fit(samples: &[(T, T)]) -> Result<Self, Error> {
        if samples.len() < 2 {
            return Err(Error::InsufficientData {
                op: "cubic spline",
                needed: 2,
                got: samples.len(),
            });
        }
        check_strictly_increasing(samples)?;

        let (a, b) = assemble_system(samples);
        debug!(
            "spline: solving {}x{} system for {} subintervals",
            a.nrows(),
            a.ncols(),
            samples.len() - 1
        );
        let coeffs = dense::solve(&a, &b)?.flatten();

        Ok(CubicSpline {
            samples: samples.to_vec(),
            coeffs,
        })
    }

    /// Number of cubic subintervals, one less than the number of samples.
    pub fn intervals(&self) -> usize {
        self.samples.len() - 1
    }

    /// The four local coefficients `[a0, a1, a2, a3]` of subinterval `i`.
    pub fn coefficients(&self, i: usize) -> &[T] {
        &self.coeffs[i * 4..i * 4 + 4]
    }

    /// Evaluates the spline at each query, in order.
    ///
    /// A query outside the sample domain repeats the most recently returned
    /// result; if nothing has been returned yet it falls back to the nearest
    /// boundary knot's y-value. Extrapolation is never performed.
    pub fn evaluate(&self, queries: &[T]) -> Vec<T> {
        let mut out = Vec::with_capacity(queries.len());
        let mut last = None;
        for &x in queries {
            let y = match self.find_interval(x) {
                Some(i) => {
                    let y = self.eval_interval(i, x);
                    last = Some(y);
                    y
                }
                None => {
                    let y = last.unwrap_or_else(|| self.boundary_value(x));
                    last = Some(y);
                    y
                }
            };
            out.push(y);
        }
        out
    }

    /// Linear scan for the subinterval with `x_i <= x <= x_{i+1}`.
    fn find_interval(&self, x: T) -> Option<usize> {
        (0..self.intervals()).find(|&i| self.samples[i].0 <= x && x <= self.samples[i + 1].0)
    }

    fn eval_interval(&self, i: usize, x: T) -> T {
        let h = x - self.samples[i].0;
        let c = self.coefficients(i);
        ((c[3] * h + c[2]) * h + c[1]) * h + c[0]
    }

    fn boundary_value(&self, x: T) -> T {
        if x < self.samples[0].0 {
            self.samples[0].1
        } else {
            self.samples[self.samples.len() - 1].1
        }
    }
}

/// One-shot convenience: fit a spline and evaluate it at `queries`.
pub fn cubic_spline_interpolate<T: Float>(
    samples: &[(T, T)],
    queries: &[T],
) -> Result<Vec<T>, Error> {
    Ok(CubicSpline::fit(samples)?.evaluate(queries))
}

fn check_strictly_increasing<T: Float>(samples: &[(T, T)]) -> Result<(), Error> {
    for (i, w) in samples.windows(2).enumerate() {
        if w[1].0 == w[0].0 {
            return Err(Error::DuplicateAbscissa { index: i + 1 });
        }
        if w[1].0 < w[0].0 {
            return Err(Error::UnsortedAbscissa { index: i + 1 });
        }
    }
    Ok(())
}

/// Builds the 4k x 4k coefficient system and its right-hand side.
///
/// Row order per subinterval i: value at the left knot, value at the right
/// knot, then (except for the last subinterval) first- and second-derivative
/// continuity at the knot shared with subinterval i+1. The two natural
/// boundary rows close the system. Only the value rows carry a nonzero
/// right-hand side.
fn assemble_system<T: Float>(samples: &[(T, T)]) -> (DenseMatrix<T>, DenseMatrix<T>) {
    let k = samples.len() - 1;
    let n = 4 * k;
    let mut a = DenseMatrix::zeros(n, n);
    let mut b = DenseMatrix::zeros(n, 1);

    let one = T::one();
    let two = one + one;
    let three = two + one;
    let six = three + three;

    let mut row = 0;
    for i in 0..k {
        let h = samples[i + 1].0 - samples[i].0;

        // a0_i = y_i
        a[(row, 4 * i)] = one;
        b[(row, 0)] = samples[i].1;
        row += 1;

        // a0_i + a1_i*h + a2_i*h^2 + a3_i*h^3 = y_{i+1}
        let mut hp = one;
        for j in 0..4 {
            a[(row, 4 * i + j)] = hp;
            hp = hp * h;
        }
        b[(row, 0)] = samples[i + 1].1;
        row += 1;

        if i + 1 < k {
            // a1_i + 2*a2_i*h + 3*a3_i*h^2 - a1_{i+1} = 0
            a[(row, 4 * i + 1)] = one;
            a[(row, 4 * i + 2)] = two * h;
            a[(row, 4 * i + 3)] = three * h * h;
            a[(row, 4 * (i + 1) + 1)] = -one;
            row += 1;

            // 2*a2_i + 6*a3_i*h - 2*a2_{i+1} = 0
            a[(row, 4 * i + 2)] = two;
            a[(row, 4 * i + 3)] = six * h;
            a[(row, 4 * (i + 1) + 2)] = -two;
            row += 1;
        }
    }

    // natural boundary: zero second derivative at both domain ends
    a[(row, 2)] = two;
    row += 1;

    let h_last = samples[k].0 - samples[k - 1].0;
    a[(row, 4 * (k - 1) + 2)] = two;
    a[(row, 4 * (k - 1) + 3)] = six * h_last;
    debug_assert_eq!(row + 1, n);

    (a, b)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::Error;

    fn wave() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]
    }

    #[test]
    fn test_passes_through_knots() {
        let samples = wave();
        let ys = cubic_spline_interpolate(&samples, &[0.0, 1.0, 2.0, 3.0]).unwrap();
        let expect = [0.0, 1.0, 0.0, 1.0];
        for (y, e) in ys.iter().zip(expect) {
            assert_relative_eq!(*y, e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_known_midpoint_value() {
        // natural spline through (0,0),(1,1),(2,0): on [0,1] it is
        // 1.5*x - 0.5*x^3, giving 0.6875 at x = 0.5
        let samples = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)];
        let ys = cubic_spline_interpolate(&samples, &[0.5]).unwrap();
        assert_relative_eq!(ys[0], 0.6875, max_relative = 1e-9);
    }

    #[test]
    fn test_natural_boundary_coefficients() {
        let spline = CubicSpline::fit(&wave()).unwrap();
        // zero curvature at the left end: a2_0 = 0
        assert_relative_eq!(spline.coefficients(0)[2], 0.0, epsilon = 1e-9);
        // zero curvature at the right end: 2*a2 + 6*a3*h = 0 on the last piece
        let c = spline.coefficients(spline.intervals() - 1);
        assert_relative_eq!(2.0 * c[2] + 6.0 * c[3] * 1.0, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_derivative_continuity_at_interior_knots() {
        let samples = vec![(0.0, 1.0), (0.5, -1.0), (1.5, 2.0), (2.0, 0.0), (3.0, 3.0)];
        let spline = CubicSpline::fit(&samples).unwrap();

        let eps = 1e-6;
        for i in 1..samples.len() - 1 {
            let x = samples[i].0;
            let left = spline.evaluate(&[x - 2.0 * eps, x - eps, x]);
            let right = spline.evaluate(&[x, x + eps, x + 2.0 * eps]);

            // one-sided first derivatives
            let d_left = (left[2] - left[1]) / eps;
            let d_right = (right[1] - right[0]) / eps;
            assert_relative_eq!(d_left, d_right, epsilon = 1e-3, max_relative = 1e-3);

            // one-sided second derivatives
            let dd_left = (left[2] - 2.0 * left[1] + left[0]) / (eps * eps);
            let dd_right = (right[2] - 2.0 * right[1] + right[0]) / (eps * eps);
            assert_relative_eq!(dd_left, dd_right, epsilon = 1e-2, max_relative = 1e-2);
        }
    }

    #[test]
    fn test_clamp_repeats_last_result() {
        let samples = wave();
        let ys = cubic_spline_interpolate(&samples, &[0.0, 1.0, 2.0, 3.0, 5.0]).unwrap();
        assert_relative_eq!(ys[4], ys[3]);
    }

    #[test]
    fn test_clamp_before_any_in_domain_query() {
        let samples = wave();
        let spline = CubicSpline::fit(&samples).unwrap();
        let ys = spline.evaluate(&[-1.0, 7.0]);
        // nearest boundary knot on each side
        assert_relative_eq!(ys[0], 0.0);
        assert_relative_eq!(ys[1], 0.0);

        let ys = spline.evaluate(&[10.0]);
        assert_relative_eq!(ys[0], 1.0);
    }

    #[test]
    fn test_two_samples_is_a_line() {
        let samples = vec![(0.0, 0.0), (2.0, 4.0)];
        let ys = cubic_spline_interpolate(&samples, &[0.5, 1.0, 1.5]).unwrap();
        assert_relative_eq!(ys[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(ys[2], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let spline = CubicSpline::fit(&wave()).unwrap();
        let queries = [0.3, 1.7, 2.9];
        assert_eq!(spline.evaluate(&queries), spline.evaluate(&queries));
    }

    #[test]
    fn test_insufficient_samples() {
        let samples = vec![(1.0, 1.0)];
        assert_eq!(
            CubicSpline::fit(&samples).map(|_| ()),
            Err(Error::InsufficientData {
                op: "cubic spline",
                needed: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn test_duplicate_abscissa() {
        let samples = vec![(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)];
        assert_eq!(
            CubicSpline::fit(&samples).map(|_| ()),
            Err(Error::DuplicateAbscissa { index: 2 })
        );
    }

    #[test]
    fn test_unsorted_abscissa() {
        let samples = vec![(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)];
        assert_eq!(
            CubicSpline::fit(&samples).map(|_| ()),
            Err(Error::UnsortedAbscissa { index: 2 })
        );
    }

    #[test]
    fn test_coefficient_layout() {
        let spline = CubicSpline::fit(&wave()).unwrap();
        assert_eq!(spline.intervals(), 3);
        // a0 of each piece is the left knot's y-value
        assert_relative_eq!(spline.coefficients(0)[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(spline.coefficients(1)[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(spline.coefficients(2)[0], 0.0, epsilon = 1e-9);
    }
}
