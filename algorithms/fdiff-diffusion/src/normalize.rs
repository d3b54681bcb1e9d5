//! Density normalization of an affinity matrix
//!
//! Sampling density leaks into the random walk built from an affinity matrix: observations in
//! densely sampled regions have large degrees and attract the walk. Dividing every affinity by
//! `(d_i d_j)^alpha` removes this influence, fully for `alpha = 1` and not at all for `alpha = 0`.
use fdiff::Float;
use fdiff_kernel::AffinityMatrix;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::error::{DiffusionMapParamsError, DiffusionError, Result, Stage};

/// Affinity matrix after density normalization
///
/// Keeps the per-observation factors `d_i^alpha` around, unseen observations are normalized
/// against the same factors in the out-of-sample extension.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityNormalized<F> {
    matrix: Array2<F>,
    alpha: F,
    alpha_degrees: Array1<F>,
}

pub(crate) fn check_alpha<F: Float>(alpha: F) -> std::result::Result<(), DiffusionMapParamsError> {
    if alpha.is_finite() && alpha >= F::zero() && alpha <= F::one() {
        Ok(())
    } else {
        Err(DiffusionMapParamsError::Alpha(
            alpha.to_f64().unwrap_or(f64::NAN),
        ))
    }
}

/// Index of the first observation without a positive similarity to any other observation
///
/// The diagonal is left out of the sum: an observation only similar to itself has a positive
/// degree, but the walk never leaves it.
pub(crate) fn find_isolated<F: Float>(affinity: ArrayView2<F>) -> Option<usize> {
    affinity
        .outer_iter()
        .enumerate()
        .position(|(i, row)| {
            let off_diagonal = row
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(F::zero(), |acc, (_, w)| acc + *w);

            off_diagonal.is_nan() || off_diagonal <= F::zero()
        })
}

/// Computes `W'[i][j] = W[i][j] / (d_i^alpha d_j^alpha)` with `d` the row sums of `W`
///
/// # Errors
///
/// * `InvalidParams` if `alpha` lies outside of `[0, 1]`
/// * `DegenerateDensity` if an observation is isolated, its similarities to all other
///   observations are zero. This happens when the kernel is too narrow for the data.
pub fn density_normalize<F: Float>(
    affinity: &AffinityMatrix<F>,
    alpha: F,
) -> Result<DensityNormalized<F>> {
    check_alpha(alpha)?;

    if let Some(index) = find_isolated(affinity.view()) {
        return Err(DiffusionError::DegenerateDensity {
            index,
            stage: Stage::Density,
        });
    }

    let degrees = affinity.degrees();
    let alpha_degrees = degrees.mapv(|d| d.powf(alpha));
    let mut matrix = affinity.view().to_owned();

    if alpha > F::zero() {
        debug!(
            "Normalizing {} observations with alpha = {}",
            affinity.size(),
            alpha
        );

        Zip::from(matrix.rows_mut())
            .and(&alpha_degrees)
            .par_for_each(|mut row, &d_i| {
                Zip::from(&mut row)
                    .and(&alpha_degrees)
                    .for_each(|w, &d_j| *w = *w / (d_i * d_j));
            });
    }

    Ok(DensityNormalized {
        matrix,
        alpha,
        alpha_degrees,
    })
}

impl<F: Float> DensityNormalized<F> {
    pub fn view(&self) -> ArrayView2<F> {
        self.matrix.view()
    }

    pub fn into_inner(self) -> Array2<F> {
        self.matrix
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// The factors `d_i^alpha` every row and column was divided by
    pub fn alpha_degrees(&self) -> ArrayView1<F> {
        self.alpha_degrees.view()
    }

    /// Row sums of the normalized matrix
    pub fn degrees(&self) -> Array1<F> {
        self.matrix.sum_axis(Axis(1))
    }
}
