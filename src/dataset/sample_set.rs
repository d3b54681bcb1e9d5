use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{iter::Curves, Float, Grid};
use crate::error::{Error, Result};

/// Sample set
///
/// An ordered collection of `N` functional observations, each evaluated on the same grid of `M`
/// points. The values are stored as a matrix with dimensionality (N, M), row `i` holding the
/// curve of observation `i`. Once constructed the set is immutable; algorithms only borrow it.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet<F> {
    grid: Grid<F>,
    values: Array2<F>,
}

/// A single observation borrowed from a sample set
///
/// Carries both the sampled values and the grid they belong to, so similarity functions can
/// use the grid spacing (e.g. for integrated norms).
#[derive(Debug, Clone, Copy)]
pub struct Curve<'a, F> {
    grid: &'a Grid<F>,
    values: ArrayView1<'a, F>,
}

impl<'a, F: Float> Curve<'a, F> {
    pub fn new(grid: &'a Grid<F>, values: ArrayView1<'a, F>) -> Result<Self> {
        if grid.len() != values.len() {
            return Err(Error::GridMismatch(format!(
                "curve has {} values for {} grid points",
                values.len(),
                grid.len()
            )));
        }

        Ok(Curve { grid, values })
    }

    pub fn grid(&self) -> &'a Grid<F> {
        self.grid
    }

    pub fn values(&self) -> ArrayView1<'a, F> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F: Float> SampleSet<F> {
    /// Creates a sample set from a grid and a value matrix with dimensionality (N, M)
    ///
    /// # Errors
    ///
    /// * `GridMismatch` if the number of columns differs from the number of grid points
    /// * `NonFinite` if any sampled value is `NaN` or infinite
    pub fn new(grid: Grid<F>, values: Array2<F>) -> Result<Self> {
        if values.ncols() != grid.len() {
            return Err(Error::GridMismatch(format!(
                "expected {} values per observation, found {}",
                grid.len(),
                values.ncols()
            )));
        }

        if let Some(((row, col), _)) = values.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(Error::NonFinite(format!(
                "value of observation {} at grid point {}",
                row, col
            )));
        }

        Ok(SampleSet { grid, values })
    }

    /// Collects observations given as separate value vectors
    ///
    /// Every curve must provide exactly one value per grid point.
    pub fn from_curves<I>(grid: Grid<F>, curves: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<F>>,
    {
        let npoints = grid.len();
        let mut flat = Vec::new();
        let mut nsamples = 0;

        for (i, curve) in curves.into_iter().enumerate() {
            if curve.len() != npoints {
                return Err(Error::GridMismatch(format!(
                    "observation {} has {} values for {} grid points",
                    i,
                    curve.len(),
                    npoints
                )));
            }
            flat.extend(curve);
            nsamples += 1;
        }

        let values = Array2::from_shape_vec((nsamples, npoints), flat)?;
        SampleSet::new(grid, values)
    }

    pub fn grid(&self) -> &Grid<F> {
        &self.grid
    }

    /// Sampled values with dimensionality (N, M)
    pub fn values(&self) -> ArrayView2<F> {
        self.values.view()
    }

    /// Number of observations
    pub fn nsamples(&self) -> usize {
        self.values.nrows()
    }

    /// Number of grid points
    pub fn npoints(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    /// Borrows observation `i`
    ///
    /// # Panics
    ///
    /// If `i` is out of bounds
    pub fn curve(&self, i: usize) -> Curve<F> {
        Curve {
            grid: &self.grid,
            values: self.values.row(i),
        }
    }

    /// Iterates over all observations in order
    pub fn curves(&self) -> Curves<F> {
        Curves::new(self)
    }

    /// Creates a new sample set with the observations at `indices`, in that order
    ///
    /// # Panics
    ///
    /// If any index is out of bounds
    pub fn select(&self, indices: &[usize]) -> SampleSet<F> {
        SampleSet {
            grid: self.grid.clone(),
            values: self.values.select(Axis(0), indices),
        }
    }

    /// Fails with `GridMismatch` unless both sets are sampled on the same grid
    pub fn ensure_same_grid(&self, other: &SampleSet<F>) -> Result<()> {
        self.grid.check_compatible(&other.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn grid3() -> Grid<f64> {
        Grid::linspace(0.0, 1.0, 3).unwrap()
    }

    #[test]
    fn construction_checks_grid() {
        let err = SampleSet::new(grid3(), array![[1.0, 2.0], [3.0, 4.0]]).unwrap_err();
        assert!(matches!(err, Error::GridMismatch(_)));

        let err = SampleSet::new(grid3(), array![[1.0, f64::INFINITY, 2.0]]).unwrap_err();
        assert!(matches!(err, Error::NonFinite(_)));

        let err =
            SampleSet::from_curves(grid3(), vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(err, Error::GridMismatch(_)));
    }

    #[test]
    fn from_curves_keeps_order() {
        let samples =
            SampleSet::from_curves(grid3(), vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]])
                .unwrap();

        assert_eq!(samples.nsamples(), 2);
        assert_eq!(samples.npoints(), 3);
        let second = array![3.0, 4.0, 5.0];
        assert_abs_diff_eq!(samples.curve(1).values(), second.view());

        let empty = SampleSet::from_curves(grid3(), Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.values().dim(), (0, 3));
    }

    #[test]
    fn select_permutes_rows() {
        let samples = SampleSet::new(
            grid3(),
            array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]],
        )
        .unwrap();

        let permuted = samples.select(&[2, 0, 1]);
        let expected = array![[2.0, 2.0, 2.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        assert_abs_diff_eq!(permuted.values(), expected.view());
        assert!(permuted.ensure_same_grid(&samples).is_ok());
    }

    #[test]
    fn curves_carry_grid() {
        let samples = SampleSet::new(grid3(), array![[0.0, 1.0, 0.0]]).unwrap();
        let curve = samples.curve(0);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve.grid(), samples.grid());
        assert!(Curve::new(samples.grid(), array![1.0].view()).is_err());
    }

    #[test]
    fn different_grids_mismatch() {
        let a = SampleSet::new(grid3(), array![[0.0, 1.0, 0.0]]).unwrap();
        let b = SampleSet::new(
            Grid::linspace(0.0, 2.0, 3).unwrap(),
            array![[0.0, 1.0, 0.0]],
        )
        .unwrap();

        assert!(matches!(
            a.ensure_same_grid(&b),
            Err(Error::GridMismatch(_))
        ));
    }
}
