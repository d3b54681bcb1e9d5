//! Utility functions for generating functional datasets

use fdiff::{Grid, Result, SampleSet};
use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal},
    RandomExt,
};
use std::f64::consts::PI;

/// Points on two interleaving half circles in the plane
///
/// The first moon is `(cos t, sin t)` and the second `(1 - cos t, 0.5 - sin t)`, with `t` spaced
/// evenly over `[0, pi]`. Gaussian noise with standard deviation `noise` is added to both
/// coordinates. Returns the points with shape `(2 * n_per_moon, 2)` and the moon of every point.
pub fn two_moons(
    n_per_moon: usize,
    noise: f64,
    rng: &mut impl Rng,
) -> (Array2<f64>, Array1<usize>) {
    let mut points = Array2::zeros((2 * n_per_moon, 2));
    let angles = Array1::linspace(0.0, PI, n_per_moon);

    for (i, t) in angles.iter().enumerate() {
        points[(i, 0)] = t.cos();
        points[(i, 1)] = t.sin();
        points[(n_per_moon + i, 0)] = 1.0 - t.cos();
        points[(n_per_moon + i, 1)] = 0.5 - t.sin();
    }

    if noise > 0.0 {
        let jitter: Array2<f64> = Array::random_using(points.dim(), StandardNormal, rng);
        points.scaled_add(noise, &jitter);
    }

    let labels = (0..2 * n_per_moon).map(|i| i / n_per_moon.max(1)).collect();

    (points, labels)
}

/// Lifts points of a `d`-dimensional space to curves on `grid`
///
/// Coordinate `k` becomes the coefficient of `sqrt(2 / L) sin((k + 1) pi (t - t0) / L)`, where
/// `[t0, t0 + L]` is the grid domain. The basis is orthonormal, so the integrated L2 distance of
/// two curves matches the euclidean distance of their points up to quadrature error.
pub fn lift_to_curves(
    points: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    grid: Grid<f64>,
) -> Result<SampleSet<f64>> {
    let (start, end) = grid.domain();
    let width = (end - start).max(f64::EPSILON);
    let scale = (2.0 / width).sqrt();

    let mut basis = Array2::zeros((points.ncols(), grid.len()));
    for (k, mut row) in basis.rows_mut().into_iter().enumerate() {
        let freq = (k + 1) as f64 * PI / width;
        for (value, t) in row.iter_mut().zip(grid.points().iter()) {
            *value = scale * (freq * (t - start)).sin();
        }
    }

    SampleSet::new(grid, points.dot(&basis))
}

/// The two moons problem on curves
///
/// Generates `n_per_moon` points on each moon with [`two_moons`] and lifts them with
/// [`lift_to_curves`] onto `n_points` equally spaced grid points in `[0, 1]`. Curves of the same
/// moon form a connected, bent structure which is not linearly separable from the other moon.
///
/// # Errors
///
/// `InsufficientData` if `n_points` is zero.
pub fn two_moons_curves(
    n_per_moon: usize,
    n_points: usize,
    noise: f64,
    rng: &mut impl Rng,
) -> Result<(SampleSet<f64>, Array1<usize>)> {
    let (points, labels) = two_moons(n_per_moon, noise, rng);
    let grid = Grid::linspace(0.0, 1.0, n_points)?;

    Ok((lift_to_curves(&points, grid)?, labels))
}

/// Sinusoids grouped by frequency
///
/// For every entry in `frequencies` a family of `n_per_family` curves
/// `sin(2 pi f t + noise * z) + noise * e(t)` is drawn on `n_points` equally spaced grid points
/// in `[0, 1]`, where `z` is a standard normal phase jitter per curve and `e(t)` standard normal
/// noise per grid point. The label of a curve is the index of its frequency.
///
/// # Errors
///
/// `InsufficientData` if `n_points` is zero.
pub fn sinusoid_families(
    n_per_family: usize,
    frequencies: &[f64],
    n_points: usize,
    noise: f64,
    rng: &mut impl Rng,
) -> Result<(SampleSet<f64>, Array1<usize>)> {
    let grid = Grid::linspace(0.0, 1.0, n_points)?;
    let n_samples = n_per_family * frequencies.len();

    let mut values = Array2::zeros((n_samples, n_points));
    for (family, freq) in frequencies.iter().enumerate() {
        let mut block = values.slice_mut(s![family * n_per_family..(family + 1) * n_per_family, ..]);
        for mut curve in block.rows_mut() {
            let z: f64 = StandardNormal.sample(rng);
            let phase = noise * z;
            for (value, t) in curve.iter_mut().zip(grid.points().iter()) {
                let eps: f64 = StandardNormal.sample(rng);
                *value = (2.0 * PI * freq * t + phase).sin() + noise * eps;
            }
        }
    }

    let labels = (0..n_samples).map(|i| i / n_per_family.max(1)).collect();

    Ok((SampleSet::new(grid, values)?, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Axis};
    use ndarray_rand::rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn moons_without_noise() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (points, labels) = two_moons(5, 0.0, &mut rng);

        assert_eq!(points.dim(), (10, 2));
        assert_eq!(labels, array![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
        assert_abs_diff_eq!(points.row(0), array![1.0, 0.0], epsilon = 1e-12);
        assert_abs_diff_eq!(points.row(4), array![-1.0, 0.0], epsilon = 1e-12);
        assert_abs_diff_eq!(points.row(5), array![0.0, 0.5], epsilon = 1e-12);
        assert_abs_diff_eq!(points.row(7), array![1.0, -0.5], epsilon = 1e-12);
    }

    #[test]
    fn lifting_preserves_distances() {
        let grid = Grid::linspace(0.0, 1.0, 401).unwrap();
        let points = array![[0.0, 0.0], [0.3, -0.4], [1.0, 0.5]];
        let samples = lift_to_curves(&points, grid).unwrap();

        for (i, j) in &[(0, 1), (0, 2), (1, 2)] {
            let diff = &points.row(*i) - &points.row(*j);
            let curves = &samples.values().row(*i) - &samples.values().row(*j);
            let l2 = samples
                .grid()
                .integrate(curves.iter().map(|x| x * x))
                .sqrt();

            assert_abs_diff_eq!(l2, diff.dot(&diff).sqrt(), epsilon = 1e-4);
        }
    }

    #[test]
    fn sinusoid_shapes() {
        let mut rng = SmallRng::seed_from_u64(3);
        let (samples, labels) = sinusoid_families(4, &[1.0, 2.0, 5.0], 30, 0.0, &mut rng).unwrap();

        assert_eq!(samples.nsamples(), 12);
        assert_eq!(samples.npoints(), 30);
        assert_eq!(labels[11], 2);
        // without noise all curves of a family coincide
        let first = samples.values().row(4).to_owned();
        for row in samples.values().axis_iter(Axis(0)).skip(5).take(3) {
            assert_abs_diff_eq!(row, first.view(), epsilon = 1e-12);
        }
    }

    #[test]
    fn noisy_sinusoids_stay_near_their_family() {
        let mut rng = SmallRng::seed_from_u64(8);
        let freqs = [1.0, 3.0];
        let (samples, labels) = sinusoid_families(5, &freqs, 40, 0.01, &mut rng).unwrap();
        let values = samples.values();

        assert_ne!(values.row(0), values.row(1));
        for (curve, label) in values.axis_iter(Axis(0)).zip(labels.iter()) {
            let clean = samples
                .grid()
                .points()
                .mapv(|t| (2.0 * PI * freqs[*label] * t).sin());
            let deviation = (&curve - &clean).fold(0.0f64, |acc, x| acc.max(x.abs()));
            assert!(deviation > 0.0 && deviation < 0.1);
        }
    }

    #[test]
    fn empty_grid() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(two_moons_curves(3, 0, 0.1, &mut rng).is_err());
    }
}
