use ndarray::{Array1, ArrayView1};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::Float;
use crate::error::{Error, Result};

/// Sampling grid shared by all curves of a sample set
///
/// The grid is a non-empty sequence of finite, strictly increasing points. Two observations
/// can only be compared when they were evaluated on the same grid, because the coordinates of a
/// sampled curve are meaningless without the points they belong to.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<F> {
    points: Array1<F>,
}

impl<F: Float> Grid<F> {
    /// Creates a grid from its sample points
    ///
    /// # Errors
    ///
    /// * `InsufficientData` for an empty grid
    /// * `NonFinite` if any point is `NaN` or infinite
    /// * `GridNotIncreasing` if the points are not strictly increasing
    pub fn new(points: Array1<F>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientData {
                found: 0,
                required: 1,
            });
        }

        if let Some(pos) = points.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFinite(format!("grid point at position {}", pos)));
        }

        if let Some(pos) = points
            .windows(2)
            .into_iter()
            .position(|w| w[1] <= w[0])
        {
            return Err(Error::GridNotIncreasing(pos + 1));
        }

        Ok(Grid { points })
    }

    /// Creates `n` evenly spaced points between `start` and `end` (inclusive)
    pub fn linspace(start: F, end: F, n: usize) -> Result<Self> {
        Grid::new(Array1::linspace(start, end, n))
    }

    pub fn points(&self) -> ArrayView1<F> {
        self.points.view()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last point of the grid
    pub fn domain(&self) -> (F, F) {
        (self.points[0], self.points[self.points.len() - 1])
    }

    /// Approximates the integral of a function sampled on this grid with the trapezoidal rule
    ///
    /// `values` must yield one value per grid point. A grid with a single point has zero
    /// measure and integrates everything to zero.
    pub fn integrate<I: IntoIterator<Item = F>>(&self, values: I) -> F {
        let half = F::cast(0.5);
        let mut values = values.into_iter();

        let mut prev = match values.next() {
            Some(v) => v,
            None => return F::zero(),
        };

        self.points
            .windows(2)
            .into_iter()
            .zip(values)
            .map(|(w, next)| {
                let area = (w[1] - w[0]) * (prev + next) * half;
                prev = next;
                area
            })
            .sum()
    }

    /// Whether both grids contain the same points up to rounding
    pub fn is_compatible(&self, other: &Grid<F>) -> bool {
        self.check_compatible(other).is_ok()
    }

    /// Checks that `other` samples the same points as `self`
    ///
    /// Points are compared with a tolerance relative to their magnitude, so grids created
    /// independently with `linspace` compare equal.
    pub fn check_compatible(&self, other: &Grid<F>) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::GridMismatch(format!(
                "expected {} grid points, found {}",
                self.len(),
                other.len()
            )));
        }

        let tol = F::epsilon() * F::cast(16.0);
        for (i, (a, b)) in self.points.iter().zip(other.points.iter()).enumerate() {
            let scale = F::one().max(a.abs()).max(b.abs());
            if (*a - *b).abs() > tol * scale {
                return Err(Error::GridMismatch(format!(
                    "grid point {} differs: {} vs {}",
                    i, a, b
                )));
            }
        }

        Ok(())
    }
}
