use fdiff::{Curve, Float};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Distance between two curves sampled on the same grid
///
/// - `Euclidean`: treats the sampled values as coordinates, `sqrt(sum_k (a_k - b_k)^2)`
/// - `L2`: functional norm of the difference, `sqrt(int (a(t) - b(t))^2 dt)`, with the integral
///   approximated by the trapezoidal rule over the grid. Unlike the euclidean distance it does
///   not depend on how densely the grid is sampled.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Euclidean,
    L2,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Euclidean
    }
}

impl Metric {
    /// Squared distance between `a` and `b`
    ///
    /// Both curves are expected to share their grid, only the grid of `a` is used.
    pub fn squared_distance<F: Float>(&self, a: &Curve<F>, b: &Curve<F>) -> F {
        debug_assert_eq!(a.len(), b.len());

        let diff = a
            .values()
            .into_iter()
            .zip(b.values())
            .map(|(x, y)| (*x - *y) * (*x - *y));

        match *self {
            Metric::Euclidean => diff.sum(),
            Metric::L2 => a.grid().integrate(diff),
        }
    }

    pub fn distance<F: Float>(&self, a: &Curve<F>, b: &Curve<F>) -> F {
        self.squared_distance(a, b).sqrt()
    }
}
