//! Diffusion Map
//!
//! The diffusion map computes an embedding of the data from the spectrum of a random walk on the
//! observations. It transforms the data along the directions of slowest diffusion and is therefore
//! a non-linear dimensionality reduction technique.
mod algorithms;
mod hyperparams;

pub use algorithms::*;
pub use hyperparams::*;
