use thiserror::Error;

pub type Result<T> = std::result::Result<T, KernelError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum KernelError {
    #[error("length scale must be positive and finite, got {0}")]
    LengthScale(f64),
    #[error("variance must be positive and finite, got {0}")]
    Variance(f64),
    #[error("shape parameter must be positive and finite, got {0}")]
    Shape(f64),
    #[error("similarity between observations {row} and {col} is {value}, expected a finite non-negative value")]
    InvalidSimilarity { row: usize, col: usize, value: f64 },
    #[error("affinity matrix must be square, got {0}x{1}")]
    NotSquare(usize, usize),
    #[error("affinity matrix is not symmetric at ({0}, {1})")]
    NotSymmetric(usize, usize),
    #[error(transparent)]
    Data(#[from] fdiff::Error),
}
