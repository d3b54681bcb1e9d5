//! Functional datasets
//!
//! This module implements the sample set struct, which stores a number of curves observed on a
//! shared grid, and the helper traits used by the algorithm crates to access it.
use ndarray::NdFloat;
use num_traits::{FromPrimitive, NumCast};

use std::iter::Sum;

mod grid;
mod impl_records;
mod iter;
mod sample_set;

pub use grid::Grid;
pub use iter::Curves;
pub use sample_set::{Curve, SampleSet};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Grid coordinates, sampled values and all
/// intermediate matrices of an embedding share the same floating point type.
pub trait Float:
    NdFloat + FromPrimitive + Default + Sum + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Record trait
///
/// Anything which consists of a number of observations, each with a fixed number of
/// coordinates. For functional data the coordinates are the grid points.
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
