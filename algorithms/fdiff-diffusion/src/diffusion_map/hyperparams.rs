use fdiff::{Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::DiffusionMapParamsError;
use crate::normalize::check_alpha;

/// Diffusion map hyperparameters
///
/// * `n_components`: dimensionality of the embedding, at most `N - 2` for `N` observations
/// * `alpha`: density normalization exponent in `[0, 1]`. Zero keeps the affinities as they are,
///   one removes the influence of the sampling density entirely.
/// * `n_steps`: diffusion time. A larger number of steps introduces a more global behaviour of
///   the projection while a smaller one (especially one) just projects close observations
///   closely together.
/// * `tolerance`: eigenvalues of smaller magnitude do not count as spectral structure
/// * `kernel`: similarity of two curves, already parameterized
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionMapValidParams<F, K> {
    n_components: usize,
    alpha: F,
    n_steps: usize,
    tolerance: F,
    kernel: K,
}

impl<F: Float, K> DiffusionMapValidParams<F, K> {
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

/// Diffusion map hyperparameters, not yet validated
///
/// See [`DiffusionMapValidParams`] for the meaning of every parameter.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionMapParams<F, K>(DiffusionMapValidParams<F, K>);

impl<F: Float, K> DiffusionMapParams<F, K> {
    /// Creates the set of default parameters
    ///
    /// Two components, no density normalization, a single step and an eigenvalue tolerance of
    /// `1e-10`.
    pub fn new(kernel: K) -> Self {
        Self(DiffusionMapValidParams {
            n_components: 2,
            alpha: F::zero(),
            n_steps: 1,
            tolerance: F::cast(1e-10),
            kernel,
        })
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.0.n_components = n_components;
        self
    }

    pub fn alpha(mut self, alpha: F) -> Self {
        self.0.alpha = alpha;
        self
    }

    /// Set the number of steps in the diffusion operator
    ///
    /// In practice scales the eigenvalues of the decomposition exponentially with the number
    /// of steps.
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.0.n_steps = n_steps;
        self
    }

    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Replaces the kernel, keeping all other parameters
    pub fn kernel<K2>(self, kernel: K2) -> DiffusionMapParams<F, K2> {
        let p = self.0;
        DiffusionMapParams(DiffusionMapValidParams {
            n_components: p.n_components,
            alpha: p.alpha,
            n_steps: p.n_steps,
            tolerance: p.tolerance,
            kernel,
        })
    }
}

impl<F: Float, K> ParamGuard for DiffusionMapParams<F, K> {
    type Checked = DiffusionMapValidParams<F, K>;
    type Error = DiffusionMapParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        check_alpha(self.0.alpha)?;

        if self.0.n_steps == 0 {
            Err(DiffusionMapParamsError::StepsZero)
        } else if self.0.n_components == 0 {
            Err(DiffusionMapParamsError::EmbeddingTooSmall(self.0.n_components))
        } else if !(self.0.tolerance.is_finite() && self.0.tolerance > F::zero()) {
            Err(DiffusionMapParamsError::NonPositiveTolerance(
                self.0.tolerance.to_f64().unwrap_or(f64::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
