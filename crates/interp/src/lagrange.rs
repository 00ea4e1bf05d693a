//! Direct evaluation of the Lagrange interpolating polynomial.

use num_traits::Float;

use crate::Error;

/// Evaluates the Lagrange polynomial through `samples` at each query x.
///
/// The result has the same length and order as `queries`. Cost is O(n^2) per
/// query. The sample x-coordinates must be pairwise distinct; a duplicate
/// would put a zero in a basis denominator, so it is rejected up front.
/// Samples do not need to be sorted.
pub fn lagrange_interpolate<T: Float>(samples: &[(T, T)], queries: &[T]) -> Result<Vec<T>, Error> {
    if samples.is_empty() {
        return Err(Error::InsufficientData {
            op: "Lagrange interpolation",
            needed: 1,
            got: 0,
        });
    }
    check_distinct(samples)?;

    let mut out = Vec::with_capacity(queries.len());
    for &x in queries {
        let mut acc = T::zero();
        for (i, &(xi, yi)) in samples.iter().enumerate() {
            let mut term = yi;
            for (j, &(xj, _)) in samples.iter().enumerate() {
                if i != j {
                    term = term * (x - xj) / (xi - xj);
                }
            }
            acc = acc + term;
        }
        out.push(acc);
    }
    Ok(out)
}

fn check_distinct<T: Float>(samples: &[(T, T)]) -> Result<(), Error> {
    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            if samples[i].0 == samples[j].0 {
                return Err(Error::DuplicateAbscissa { index: j });
            }
        }
    }
    Ok(())
}
