use fdiff_kernel::KernelError;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiffusionError>;

/// Pipeline stage at which a zero degree was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Row sums of the raw affinity matrix, before density normalization
    Density,
    /// Similarities of an unseen observation to the fitted observations
    OutOfSample,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::Density => "density normalization",
            Stage::OutOfSample => "out-of-sample extension",
        };
        f.write_str(stage)
    }
}

/// Invalid diffusion map hyperparameters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum DiffusionMapParamsError {
    #[error("alpha must lie in [0, 1], got {0}")]
    Alpha(f64),
    #[error("Number of steps zero in diffusion map operator")]
    StepsZero,
    #[error("embedding dimension must be at least one, got {0}")]
    EmbeddingTooSmall(usize),
    #[error("eigenvalue tolerance must be positive and finite, got {0}")]
    NonPositiveTolerance(f64),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffusionError {
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] DiffusionMapParamsError),
    #[error(transparent)]
    Data(#[from] fdiff::Error),
    #[error("observation {index} has zero degree during {stage}, the kernel is too narrow for the data")]
    DegenerateDensity { index: usize, stage: Stage },
    #[error("{requested} diffusion coordinates requested, but only {available} non-trivial eigenpairs are available")]
    RankDeficiency { requested: usize, available: usize },
    #[error(transparent)]
    Kernel(KernelError),
    #[error(transparent)]
    Linalg(#[from] linfa_linalg::LinalgError),
}

impl From<KernelError> for DiffusionError {
    fn from(err: KernelError) -> Self {
        // data errors are reported the same way, no matter which crate observed them
        match err {
            KernelError::Data(err) => DiffusionError::Data(err),
            err => DiffusionError::Kernel(err),
        }
    }
}
