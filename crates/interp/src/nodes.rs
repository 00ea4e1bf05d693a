//! Node generation and closest-sample selection.

use num_traits::{Float, FloatConst};

use crate::Error;

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
///
/// `count` must be at least 2; a single point has no defined spacing.
pub fn linspace<T: Float>(start: T, stop: T, count: usize) -> Result<Vec<T>, Error> {
    if count < 2 {
        return Err(Error::InsufficientData {
            op: "linspace",
            needed: 2,
            got: count,
        });
    }
    let last = T::from(count - 1).unwrap();
    Ok((0..count)
        .map(|i| start + (stop - start) * T::from(i).unwrap() / last)
        .collect())
}

/// `count` Chebyshev nodes over `[start, stop]`.
///
/// Computed as `(start+stop)/2 + (stop-start)/2 * cos((2i+1)/(2*count) * pi)`,
/// which yields the nodes in descending order over the interval. An empty vec
/// is returned for `count == 0`.
pub fn chebyshev_nodes<T: Float + FloatConst>(start: T, stop: T, count: usize) -> Vec<T> {
    let two = T::one() + T::one();
    let mid = (start + stop) / two;
    let half = (stop - start) / two;
    (0..count)
        .map(|i| {
            let angle = T::from(2 * i + 1).unwrap() / T::from(2 * count).unwrap() * T::PI();
            mid + half * angle.cos()
        })
        .collect()
}

/// Node-placement strategy used by [`select_points`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStrategy {
    /// Evenly spaced over the sample domain.
    Uniform,
    /// Chebyshev-spaced, denser toward the domain edges.
    Chebyshev,
}

impl NodeStrategy {
    fn nodes<T: Float + FloatConst>(self, start: T, stop: T, count: usize) -> Result<Vec<T>, Error> {
        match self {
            NodeStrategy::Uniform => linspace(start, stop, count),
            NodeStrategy::Chebyshev => Ok(chebyshev_nodes(start, stop, count)),
        }
    }
}

/// Thins `samples` down to the ones closest to the `count` x-values the
/// strategy places over the sample domain.
///
/// Ties keep the earlier sample. Repeated picks are dropped, preserving
/// first-encountered order, so the result may be shorter than `count`.
pub fn select_points<T: Float + FloatConst>(
    samples: &[(T, T)],
    strategy: NodeStrategy,
    count: usize,
) -> Result<Vec<(T, T)>, Error> {
    if samples.is_empty() {
        return Err(Error::InsufficientData {
            op: "point selection",
            needed: 1,
            got: 0,
        });
    }

    let start = samples[0].0;
    let stop = samples[samples.len() - 1].0;
    let targets = strategy.nodes(start, stop, count)?;

    let mut picked: Vec<(T, T)> = Vec::with_capacity(targets.len());
    for t in targets {
        let mut best = samples[0];
        for &s in &samples[1..] {
            if (s.0 - t).abs() < (best.0 - t).abs() {
                best = s;
            }
        }
        if !picked.iter().any(|&p| p == best) {
            picked.push(best);
        }
    }
    Ok(picked)
}
