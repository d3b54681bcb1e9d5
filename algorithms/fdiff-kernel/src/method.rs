use fdiff::{Curve, Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::metric::Metric;
use crate::Kernel;

/// The decay profile of a kernel as a function of the distance `d` between two curves.
///
/// There are three methods available:
///
/// - Gaussian:  `variance * exp(-d^2 / (2 l^2))`
/// - Laplacian(l):  `exp(-d / l)`
/// - RationalQuadratic:  `(1 + d^2 / (2 a l^2))^(-a)`
///
/// All of them are symmetric, non-negative and decay with distance. The length scale `l`
/// controls the size of the neighbourhood considered similar.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum KernelMethod<F> {
    /// Squared exponential with output variance
    Gaussian { length_scale: F, variance: F },
    /// Exponential decay in the distance
    Laplacian(F),
    /// Scale mixture of gaussians with shape `a`
    RationalQuadratic { length_scale: F, shape: F },
}

impl<F: Float> KernelMethod<F> {
    /// Evaluates the decay profile for a squared distance
    pub fn from_squared_distance(&self, sq_dist: F) -> F {
        match *self {
            KernelMethod::Gaussian {
                length_scale,
                variance,
            } => variance * (-sq_dist / (F::cast(2.0) * length_scale * length_scale)).exp(),
            KernelMethod::Laplacian(length_scale) => (-sq_dist.sqrt() / length_scale).exp(),
            KernelMethod::RationalQuadratic {
                length_scale,
                shape,
            } => (F::one() + sq_dist / (F::cast(2.0) * shape * length_scale * length_scale))
                .powf(-shape),
        }
    }

    pub fn length_scale(&self) -> F {
        match *self {
            KernelMethod::Gaussian { length_scale, .. }
            | KernelMethod::Laplacian(length_scale)
            | KernelMethod::RationalQuadratic { length_scale, .. } => length_scale,
        }
    }

    fn with_length_scale(self, length_scale: F) -> Self {
        match self {
            KernelMethod::Gaussian { variance, .. } => KernelMethod::Gaussian {
                length_scale,
                variance,
            },
            KernelMethod::Laplacian(_) => KernelMethod::Laplacian(length_scale),
            KernelMethod::RationalQuadratic { shape, .. } => KernelMethod::RationalQuadratic {
                length_scale,
                shape,
            },
        }
    }
}

/// A validated kernel on curves: a decay profile applied to a curve metric
///
/// # Example
///
/// ```
/// use fdiff::{Grid, SampleSet};
/// use fdiff_kernel::{CurveKernel, Kernel, Metric};
/// use ndarray::array;
///
/// let grid = Grid::linspace(0.0, 1.0, 3).unwrap();
/// let samples = SampleSet::new(grid, array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]).unwrap();
///
/// let kernel = CurveKernel::gaussian(1.0).unwrap();
/// let similarity = kernel.similarity(&samples.curve(0), &samples.curve(1));
/// assert!((similarity - (-1.5f64).exp()).abs() < 1e-12);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveKernel<F> {
    method: KernelMethod<F>,
    metric: Metric,
}

/// Defines the set of parameters needed to build a curve kernel
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KernelParams<F>(CurveKernel<F>);

impl<F: Float> CurveKernel<F> {
    /// Default parameters: a gaussian with unit length scale and variance on euclidean
    /// distances between sampled values
    pub fn params() -> KernelParams<F> {
        KernelParams(CurveKernel {
            method: KernelMethod::Gaussian {
                length_scale: F::one(),
                variance: F::one(),
            },
            metric: Metric::Euclidean,
        })
    }

    /// Gaussian kernel with unit variance
    pub fn gaussian(length_scale: F) -> Result<Self> {
        Self::params()
            .method(KernelMethod::Gaussian {
                length_scale,
                variance: F::one(),
            })
            .check()
    }

    pub fn laplacian(length_scale: F) -> Result<Self> {
        Self::params()
            .method(KernelMethod::Laplacian(length_scale))
            .check()
    }

    pub fn method(&self) -> &KernelMethod<F> {
        &self.method
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl<F: Float> KernelParams<F> {
    /// Setter for `method`, the decay profile of the kernel
    pub fn method(mut self, method: KernelMethod<F>) -> Self {
        self.0.method = method;
        self
    }

    /// Setter for `metric`, the distance between curves
    pub fn metric(mut self, metric: Metric) -> Self {
        self.0.metric = metric;
        self
    }

    /// Replaces the length scale of the current method
    pub fn length_scale(mut self, length_scale: F) -> Self {
        self.0.method = self.0.method.with_length_scale(length_scale);
        self
    }
}

fn positive<F: Float>(x: F) -> bool {
    x.is_finite() && x > F::zero()
}

fn as_f64<F: Float>(x: F) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

impl<F: Float> ParamGuard for KernelParams<F> {
    type Checked = CurveKernel<F>;
    type Error = KernelError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let length_scale = self.0.method.length_scale();
        if !positive(length_scale) {
            return Err(KernelError::LengthScale(as_f64(length_scale)));
        }

        match self.0.method {
            KernelMethod::Gaussian { variance, .. } if !positive(variance) => {
                Err(KernelError::Variance(as_f64(variance)))
            }
            KernelMethod::RationalQuadratic { shape, .. } if !positive(shape) => {
                Err(KernelError::Shape(as_f64(shape)))
            }
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> Kernel<F> for CurveKernel<F> {
    fn similarity(&self, a: &Curve<F>, b: &Curve<F>) -> F {
        self.method
            .from_squared_distance(self.metric.squared_distance(a, b))
    }
}
