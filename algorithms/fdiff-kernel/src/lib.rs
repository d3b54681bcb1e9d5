//! ## Kernels on functional data
//!
//! A kernel measures how similar two curves are. Diffusion maps only need a handful of
//! properties from it: the similarity must be symmetric, non-negative and decay with the distance
//! between the curves, with a length scale controlling the size of the neighbourhood of curves
//! regarded as similar.
//!
//! ## Current State
//!
//! fdiff-kernel provides
//!
//! * the [`Kernel`] trait, the only contract the embedding engine depends on
//! * [`CurveKernel`], gaussian, laplacian and rational quadratic profiles evaluated on either the
//!   euclidean distance of the sampled values or the integrated L2 distance of the curves
//! * [`AffinityMatrix`], the dense matrix of all pairwise similarities of a sample set, computed
//!   in parallel
//!
//! Sparse nearest-neighbour affinities are not provided, every pair is evaluated.

mod affinity;
mod error;
mod method;
mod metric;

pub use affinity::AffinityMatrix;
pub use error::{KernelError, Result};
pub use method::{CurveKernel, KernelMethod, KernelParams};
pub use metric::Metric;

use fdiff::{Curve, Float};

/// Similarity function between two curves sampled on the same grid
///
/// Implementations must be symmetric, `similarity(a, b) == similarity(b, a)`, and return finite
/// non-negative values. Kernels are shared read-only between the workers evaluating the affinity
/// matrix and are therefore required to be `Sync`.
pub trait Kernel<F: Float>: Sync {
    fn similarity(&self, a: &Curve<F>, b: &Curve<F>) -> F;
}

impl<F: Float, K: Kernel<F> + ?Sized> Kernel<F> for &K {
    fn similarity(&self, a: &Curve<F>, b: &Curve<F>) -> F {
        (**self).similarity(a, b)
    }
}

/// Turns a closure into a kernel
///
/// ```
/// use fdiff::{Curve, Grid, SampleSet};
/// use fdiff_kernel::{AffinityMatrix, FnKernel};
/// use ndarray::array;
///
/// let grid = Grid::linspace(0.0, 1.0, 2).unwrap();
/// let samples = SampleSet::new(grid, array![[0.0, 1.0], [1.0, 1.0]]).unwrap();
///
/// // inverse multiquadric on the first grid point
/// let kernel = FnKernel(|a: &Curve<f64>, b: &Curve<f64>| {
///     let d = a.values()[0] - b.values()[0];
///     1.0 / (1.0 + d * d).sqrt()
/// });
/// let affinity = AffinityMatrix::from_samples(&samples, &kernel).unwrap();
/// assert!((affinity.view()[(0, 1)] - 0.5f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnKernel<Fun>(pub Fun);

impl<F, Fun> Kernel<F> for FnKernel<Fun>
where
    F: Float,
    Fun: Fn(&Curve<F>, &Curve<F>) -> F + Sync,
{
    fn similarity(&self, a: &Curve<F>, b: &Curve<F>) -> F {
        (self.0)(a, b)
    }
}
