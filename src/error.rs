//! Error types in fdiff
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("at least {required} observations needed, got {found}")]
    InsufficientData { found: usize, required: usize },
    #[error("observations are not co-sampled: {0}")]
    GridMismatch(String),
    #[error("grid points must be strictly increasing (violated at position {0})")]
    GridNotIncreasing(usize),
    #[error("non-finite value encountered {0}")]
    NonFinite(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
