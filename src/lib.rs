//! `fdiff` provides the building blocks for embedding functional data with diffusion maps.
//!
//! A functional observation is a curve sampled at a fixed set of grid points. Collections of
//! such curves are stored in a [`SampleSet`], which guarantees that every observation shares the
//! exact same [`Grid`]. Algorithm crates of the workspace borrow sample sets read-only:
//!
//! * `fdiff-kernel` evaluates similarity functions between curves and assembles affinity matrices
//! * `fdiff-diffusion` turns an affinity matrix into a Markov transition operator and extracts
//!   diffusion coordinates from its spectrum
//!
//! This crate only hosts the shared vocabulary: the [`Float`] bound, the error type, the
//! hyperparameter guard and the algorithm traits.
//!
//! ## Example
//!
//! ```
//! use fdiff::{Grid, SampleSet};
//! use ndarray::array;
//!
//! let grid = Grid::linspace(0.0, 1.0, 3).unwrap();
//! let samples = SampleSet::new(grid, array![[0.0, 0.5, 1.0], [1.0, 0.5, 0.0]]).unwrap();
//!
//! assert_eq!(samples.nsamples(), 2);
//! assert_eq!(samples.npoints(), 3);
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Curve, Float, Grid, Records, SampleSet};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;
