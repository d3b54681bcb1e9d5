//! # Diffusion maps for functional data
//!
//! `fdiff-diffusion` computes low dimensional diffusion coordinates of curves sampled on a common
//! grid. The embedding is built in a sequence of stages, each producing a new matrix:
//!
//! 1. [`AffinityMatrix`](fdiff_kernel::AffinityMatrix): kernel similarities of all pairs of curves
//! 2. [`DensityNormalized`]: affinities divided by `(d_i d_j)^alpha`
//! 3. [`TransitionOperator`]: the row stochastic random walk
//! 4. [`SpectralDecomposition`]: eigenpairs of the walk, computed on its symmetric conjugate
//!
//! The diffusion time scales the eigenvalues, `lambda^n_steps`, after the trivial eigenpair has
//! been discarded. The transition operator is never raised to a power for the embedding.
//!
//! [`DiffusionMap`] wraps the stages behind the `Fit` trait and extends a fitted embedding to
//! unseen curves, [`embed`] returns the coordinates in a single call.
//!
//! ## Example
//!
//! ```
//! use fdiff::{Grid, SampleSet};
//! use fdiff_kernel::CurveKernel;
//! use ndarray::Array2;
//!
//! let grid = Grid::linspace(0.0, 1.0, 20).unwrap();
//! let values = Array2::from_shape_fn((10, 20), |(i, j)| (i as f64 * 0.3 + j as f64 * 0.05).sin());
//! let samples = SampleSet::new(grid, values).unwrap();
//!
//! let kernel = CurveKernel::gaussian(1.0).unwrap();
//! let embedding = fdiff_diffusion::embed(&samples, kernel, 2, 0.5, 1).unwrap();
//!
//! assert_eq!(embedding.dim(), (10, 2));
//! ```

mod diffusion_map;
mod error;
mod normalize;
mod spectral;
mod transition;

pub use diffusion_map::{DiffusionMap, DiffusionMapParams, DiffusionMapValidParams};
pub use error::{DiffusionError, DiffusionMapParamsError, Result, Stage};
pub use normalize::{density_normalize, DensityNormalized};
pub use spectral::SpectralDecomposition;
pub use transition::TransitionOperator;

use fdiff::{traits::Fit, Float, SampleSet};
use fdiff_kernel::Kernel;
use ndarray::Array2;

/// Diffusion coordinates of `samples`
///
/// Returns a matrix with dimensionality (N, n_components), row `i` holding the coordinates of
/// observation `i`. See [`DiffusionMap`] for the fitted model.
///
/// # Errors
///
/// * `InvalidParams` for `alpha` outside of `[0, 1]`, `n_steps < 1` or `n_components < 1`
/// * `InsufficientData` for less than two observations
/// * `RankDeficiency` if `n_components > N - 2` or the spectrum is degenerate
/// * `DegenerateDensity` if an observation is isolated under the kernel
pub fn embed<F: Float, K: Kernel<F> + Clone>(
    samples: &SampleSet<F>,
    kernel: K,
    n_components: usize,
    alpha: F,
    n_steps: usize,
) -> Result<Array2<F>> {
    DiffusionMap::params(kernel)
        .n_components(n_components)
        .alpha(alpha)
        .n_steps(n_steps)
        .fit(samples)
        .map(DiffusionMap::into_embedding)
}
