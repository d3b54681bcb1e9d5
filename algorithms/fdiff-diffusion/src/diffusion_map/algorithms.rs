//! Diffusion Map
//!
//! The diffusion map computes an embedding of the data from the spectrum of a random walk on the
//! observations. A kernel describes the high dimensional diffusion graph, after density
//! normalization and row normalization the (i, j) entry is the probability that a diffusion
//! happens from observation i to j.
use fdiff::{traits::Fit, traits::Transformer, Float, SampleSet};
use fdiff_kernel::{AffinityMatrix, Kernel};
use log::info;
use ndarray::{Array1, Array2, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::hyperparams::{DiffusionMapParams, DiffusionMapValidParams};
use crate::error::{DiffusionError, Result, Stage};
use crate::normalize::density_normalize;
use crate::spectral::SpectralDecomposition;
use crate::transition::TransitionOperator;

/// Embedding of diffusion map technique
///
/// After fitting a sample set this structure stores the diffusion coordinates of every
/// observation, the spectrum they were derived from and everything needed to place unseen
/// curves into the same coordinates with the Nyström extension.
///
/// # Example
///
/// ```
/// use fdiff::traits::{Fit, Transformer};
/// use fdiff::ParamGuard;
/// use fdiff_diffusion::DiffusionMap;
/// use fdiff_kernel::{CurveKernel, Metric};
/// use rand_xoshiro::rand_core::SeedableRng;
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let mut rng = Xoshiro256Plus::seed_from_u64(42);
/// let (samples, _labels) = fdiff_datasets::two_moons_curves(30, 50, 0.05, &mut rng).unwrap();
///
/// // gaussian kernel on the integrated distance between curves
/// let kernel = CurveKernel::params()
///     .metric(Metric::L2)
///     .length_scale(0.3)
///     .check()
///     .unwrap();
///
/// let model = DiffusionMap::params(kernel)
///     .n_components(2)
///     .alpha(0.5)
///     .fit(&samples)
///     .unwrap();
///
/// assert_eq!(model.embedding().dim(), (60, 2));
///
/// // embed unseen curves
/// let coords = model.transform(&samples.select(&[0, 1])).unwrap();
/// assert_eq!(coords.dim(), (2, 2));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionMap<F, K> {
    embedding: Array2<F>,
    eigvals: Array1<F>,
    raw_eigvals: Array1<F>,
    degrees: Array1<F>,
    alpha_degrees: Array1<F>,
    alpha: F,
    n_steps: usize,
    kernel: K,
    train: SampleSet<F>,
}

impl<F: Float, K: Kernel<F> + Clone> Fit<SampleSet<F>, DiffusionError>
    for DiffusionMapValidParams<F, K>
{
    type Object = DiffusionMap<F, K>;

    /// Embeds a sample set
    ///
    /// # Errors
    ///
    /// * `InsufficientData` for less than two observations
    /// * `RankDeficiency` if more than `N - 2` components are requested, or the operator has
    ///   not enough eigenvalues above the tolerance
    /// * `DegenerateDensity` if an observation is isolated under the kernel
    fn fit(&self, samples: &SampleSet<F>) -> Result<Self::Object> {
        let n = samples.nsamples();
        if n < 2 {
            return Err(fdiff::Error::InsufficientData {
                found: n,
                required: 2,
            }
            .into());
        }
        if self.n_components() > n - 2 {
            return Err(DiffusionError::RankDeficiency {
                requested: self.n_components(),
                available: n - 2,
            });
        }

        info!(
            "Fitting diffusion map with {} components on {} observations (alpha = {}, steps = {})",
            self.n_components(),
            n,
            self.alpha(),
            self.n_steps()
        );

        let affinity = AffinityMatrix::from_samples(samples, self.kernel())?;
        let normalized = density_normalize(&affinity, self.alpha())?;
        let operator = TransitionOperator::from_normalized(&normalized);
        let decomposition = SpectralDecomposition::from_operator(&operator)?;

        let (embedding, raw_eigvals) =
            decomposition.embed(self.n_components(), self.n_steps(), self.tolerance())?;
        let steps = F::cast(self.n_steps());
        let eigvals = raw_eigvals.mapv(|x| x.powf(steps));

        Ok(DiffusionMap {
            embedding,
            eigvals,
            raw_eigvals,
            degrees: operator.degrees().to_owned(),
            alpha_degrees: normalized.alpha_degrees().to_owned(),
            alpha: self.alpha(),
            n_steps: self.n_steps(),
            kernel: self.kernel().clone(),
            train: samples.clone(),
        })
    }
}

impl<'a, F: Float, K: Kernel<F>> Transformer<&'a SampleSet<F>, Result<Array2<F>>>
    for DiffusionMap<F, K>
{
    /// Places unseen curves into the fitted diffusion coordinates
    ///
    /// Every new curve is connected to the fitted observations with the kernel, normalized with
    /// the fitted density factors and averaged over the embedding, divided by the single step
    /// eigenvalues. Curves of the fitted set are mapped onto their own coordinates.
    ///
    /// # Errors
    ///
    /// * `GridMismatch` if the curves are sampled on a different grid
    /// * `DegenerateDensity` if a curve has zero similarity to all fitted observations
    fn transform(&self, samples: &'a SampleSet<F>) -> Result<Array2<F>> {
        let mut weights = AffinityMatrix::cross(samples, &self.train, &self.kernel)?;

        for (index, mut row) in weights.rows_mut().into_iter().enumerate() {
            let degenerate = DiffusionError::DegenerateDensity {
                index,
                stage: Stage::OutOfSample,
            };

            let q = row.sum();
            if q.is_nan() || q <= F::zero() {
                return Err(degenerate);
            }

            let q_alpha = q.powf(self.alpha);
            Zip::from(&mut row)
                .and(&self.alpha_degrees)
                .for_each(|w, &d| *w = *w / (q_alpha * d));

            let total = row.sum();
            if total.is_nan() || total <= F::zero() {
                return Err(degenerate);
            }
            row /= total;
        }

        let mut coords = weights.dot(&self.embedding);
        for (mut column, val) in coords.columns_mut().into_iter().zip(self.raw_eigvals.iter()) {
            column /= *val;
        }

        Ok(coords)
    }
}

impl<F: Float, K> DiffusionMap<F, K> {
    /// Creates the set of default parameters
    ///
    /// # Parameters
    ///
    /// * `kernel`: similarity between curves
    ///
    /// # Returns
    ///
    /// Parameter set with two components, alpha = 0 and number of steps = 1
    pub fn params(kernel: K) -> DiffusionMapParams<F, K> {
        DiffusionMapParams::new(kernel)
    }

    /// Estimate the number of clusters in this embedding (very crude for now)
    pub fn estimate_clusters(&self) -> usize {
        let mean = self.eigvals.sum() / F::cast(self.eigvals.len());
        self.eigvals.iter().filter(|x| *x > &mean).count() + 1
    }

    /// Return the eigenvalues of the diffusion operator, raised to the number of steps
    pub fn eigvals(&self) -> &Array1<F> {
        &self.eigvals
    }

    /// Return the single step eigenvalues of the diffusion operator
    pub fn raw_eigvals(&self) -> &Array1<F> {
        &self.raw_eigvals
    }

    /// Return the embedding
    pub fn embedding(&self) -> &Array2<F> {
        &self.embedding
    }

    pub fn into_embedding(self) -> Array2<F> {
        self.embedding
    }

    /// Row sums of the density normalized affinity matrix
    pub fn degrees(&self) -> &Array1<F> {
        &self.degrees
    }

    pub fn n_components(&self) -> usize {
        self.embedding.ncols()
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}
