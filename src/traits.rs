//! Provide traits for different classes of algorithms
//!

use crate::dataset::Records;

/// Transformation algorithms
///
/// A transformer takes a dataset and transforms it into a different one. It has no concept of
/// state and provides therefore no method to predict new data. A typical example are kernel
/// methods, building a similarity matrix from a sample set, or a fitted embedding mapping unseen
/// observations into its coordinates.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a set of observations and creates a concept of some kind about it.
/// For diffusion maps this is the spectral decomposition of the transition operator, which can
/// afterwards extend the embedding to unseen observations.
pub trait Fit<R: Records, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E>;
}
