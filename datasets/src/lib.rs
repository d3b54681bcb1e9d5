//! `fdiff-datasets` provides synthetic functional datasets ready to be used in tests, examples and
//! benchmarks.
//!
//! ## The Big Picture
//!
//! `fdiff-datasets` is a crate in the `fdiff` workspace. The generators return curves on a common
//! grid together with the label of the group each curve was drawn from, so embeddings can be
//! checked against a known structure.
//!
//! ## Current State
//!
//! Currently the following generators are provided:
//!
//! * [`two_moons_curves`](generate::two_moons_curves): the two interleaving half circles, lifted
//!   into curves
//! * [`sinusoid_families`](generate::sinusoid_families): noisy sinusoids grouped by frequency
//!
//! ## Using a dataset
//!
//! ```
//! use fdiff_datasets::generate;
//! use ndarray_rand::rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let (samples, labels) = generate::two_moons_curves(50, 64, 0.05, &mut rng).unwrap();
//!
//! assert_eq!(samples.nsamples(), 100);
//! assert_eq!(samples.npoints(), 64);
//! assert_eq!(labels.len(), 100);
//! ```

pub mod generate;

pub use generate::{sinusoid_families, two_moons_curves};
