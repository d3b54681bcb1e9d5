use fdiff::{Float, SampleSet};
use log::{debug, info};
use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayView2, Axis};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::Kernel;

/// Dense affinity matrix between all pairs of observations
///
/// The (i, j) entry holds the similarity between observation `i` and `j`. The matrix is square,
/// symmetric, finite and non-negative; constructors refuse anything else.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityMatrix<F> {
    matrix: Array2<F>,
}

fn check_similarity<F: Float>(row: usize, col: usize, value: F) -> Result<()> {
    if value.is_finite() && value >= F::zero() {
        Ok(())
    } else {
        Err(KernelError::InvalidSimilarity {
            row,
            col,
            value: value.to_f64().unwrap_or(f64::NAN),
        })
    }
}

fn check_enough_samples(n: usize) -> Result<()> {
    if n < 2 {
        return Err(fdiff::Error::InsufficientData {
            found: n,
            required: 2,
        }
        .into());
    }

    Ok(())
}

impl<F: Float> AffinityMatrix<F> {
    /// Evaluates `kernel` for all pairs of observations
    ///
    /// Only the upper triangle is evaluated, rows are distributed over the rayon thread pool and
    /// the result is mirrored into the lower triangle. The kernel is therefore assumed to be
    /// symmetric.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` for less than two observations
    /// * `InvalidSimilarity` if the kernel returns a negative or non-finite value
    pub fn from_samples<K: Kernel<F>>(samples: &SampleSet<F>, kernel: &K) -> Result<Self> {
        let n = samples.nsamples();
        check_enough_samples(n)?;

        info!(
            "Building affinity matrix for {} observations with {} grid points",
            n,
            samples.npoints()
        );

        let upper: Vec<Vec<F>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = samples.curve(i);
                (i..n)
                    .map(|j| kernel.similarity(&a, &samples.curve(j)))
                    .collect()
            })
            .collect();

        let mut matrix = Array2::zeros((n, n));
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + offset;
                check_similarity(i, j, value)?;

                matrix[(i, j)] = value;
                matrix[(j, i)] = value;
            }
        }

        debug!("Evaluated {} kernel pairs", n * (n + 1) / 2);

        Ok(AffinityMatrix { matrix })
    }

    /// Wraps a precomputed similarity matrix
    ///
    /// # Errors
    ///
    /// * `NotSquare` if the matrix is not square
    /// * `InsufficientData` for less than two observations
    /// * `InvalidSimilarity` for negative or non-finite entries
    /// * `NotSymmetric` if `m[i][j]` and `m[j][i]` differ by more than a relative `1e-8`
    pub fn from_array(matrix: Array2<F>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(KernelError::NotSquare(rows, cols));
        }
        check_enough_samples(rows)?;

        for ((i, j), value) in matrix.indexed_iter() {
            check_similarity(i, j, *value)?;
        }

        let affinity = AffinityMatrix { matrix };
        if let Some((i, j)) = affinity.asymmetry(F::cast(1e-8)) {
            return Err(KernelError::NotSymmetric(i, j));
        }

        Ok(affinity)
    }

    /// Similarities between unseen observations and the observations of a fitted set
    ///
    /// Returns a matrix with dimensionality (new.nsamples(), train.nsamples()).
    ///
    /// # Errors
    ///
    /// * `GridMismatch` if both sets are not sampled on the same grid
    /// * `InvalidSimilarity` if the kernel returns a negative or non-finite value
    pub fn cross<K: Kernel<F>>(
        new: &SampleSet<F>,
        train: &SampleSet<F>,
        kernel: &K,
    ) -> Result<Array2<F>> {
        train.ensure_same_grid(new)?;

        let mut matrix = Array2::zeros((new.nsamples(), train.nsamples()));
        matrix
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut row)| {
                let a = new.curve(i);
                for (j, value) in row.iter_mut().enumerate() {
                    *value = kernel.similarity(&a, &train.curve(j));
                }
            });

        for ((i, j), value) in matrix.indexed_iter() {
            check_similarity(i, j, *value)?;
        }

        Ok(matrix)
    }

    /// Number of observations
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn view(&self) -> ArrayView2<F> {
        self.matrix.view()
    }

    pub fn into_inner(self) -> Array2<F> {
        self.matrix
    }

    /// Row sums of the affinity matrix
    pub fn degrees(&self) -> Array1<F> {
        self.matrix.sum_axis(Axis(1))
    }

    pub fn diagonal(&self) -> Array1<F> {
        self.matrix.diag().to_owned()
    }

    /// Copy of all elements strictly above the diagonal, row by row
    pub fn to_upper_triangle(&self) -> Vec<F> {
        self.matrix
            .indexed_iter()
            .filter(|((row, col), _)| col > row)
            .map(|(_, val)| *val)
            .collect()
    }

    /// Whether `m[i][j]` and `m[j][i]` agree up to a relative tolerance
    pub fn is_symmetric(&self, tol: F) -> bool {
        self.asymmetry(tol).is_none()
    }

    fn asymmetry(&self, tol: F) -> Option<(usize, usize)> {
        let n = self.size();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .find(|&(i, j)| {
                let (a, b) = (self.matrix[(i, j)], self.matrix[(j, i)]);
                (a - b).abs() > tol * F::one().max(a.abs()).max(b.abs())
            })
    }
}
