use approx::assert_abs_diff_eq;
use fdiff::traits::{Fit, Transformer};
use fdiff::{Grid, ParamGuard, SampleSet};
use fdiff_diffusion::{
    density_normalize, embed, DiffusionError, DiffusionMap, DiffusionMapParamsError, Stage,
    TransitionOperator,
};
use fdiff_kernel::{AffinityMatrix, CurveKernel, Metric};
use ndarray::{Array, Array1, Array2, Axis};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;

fn l2_gaussian(length_scale: f64) -> CurveKernel<f64> {
    CurveKernel::params()
        .metric(Metric::L2)
        .length_scale(length_scale)
        .check()
        .unwrap()
}

fn random_samples(n: usize, m: usize, seed: u64) -> SampleSet<f64> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let grid = Grid::linspace(0.0, 1.0, m).unwrap();
    let values = Array::random_using((n, m), Uniform::new(-1., 1.), &mut rng);

    SampleSet::new(grid, values).unwrap()
}

#[test]
fn pipeline_invariants() {
    let mut rng = Xoshiro256Plus::seed_from_u64(3);
    let (samples, _) =
        fdiff_datasets::sinusoid_families(10, &[1.0, 3.0], 40, 0.2, &mut rng).unwrap();
    let affinity = AffinityMatrix::from_samples(&samples, &l2_gaussian(0.5)).unwrap();

    assert!(affinity.is_symmetric(1e-12));

    let unchanged = density_normalize(&affinity, 0.0).unwrap();
    assert_eq!(unchanged.view(), affinity.view());

    for alpha in &[0.0, 0.25, 0.5, 1.0] {
        let normalized = density_normalize(&affinity, *alpha).unwrap();
        let operator = TransitionOperator::from_normalized(&normalized);

        assert_abs_diff_eq!(operator.row_sums(), Array1::ones(20), epsilon = 1e-12);
    }
}

#[test]
fn moons_are_separated() {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let (samples, labels) = fdiff_datasets::two_moons_curves(50, 64, 0.04, &mut rng).unwrap();

    let embedding = embed(&samples, l2_gaussian(0.1), 2, 0.0, 1).unwrap();
    assert_eq!(embedding.dim(), (100, 2));

    // the slowest mode of the walk tells the moons apart
    let first = embedding.column(0);
    let positive = first
        .iter()
        .zip(labels.iter())
        .filter(|(x, label)| (**x > 0.0) == (**label == 1))
        .count();
    assert!(positive == 0 || positive == 100);
}

#[test]
fn unseen_moon_curves() {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let (train, labels) = fdiff_datasets::two_moons_curves(50, 64, 0.04, &mut rng).unwrap();
    let (test, test_labels) = fdiff_datasets::two_moons_curves(20, 64, 0.04, &mut rng).unwrap();

    let model = DiffusionMap::params(l2_gaussian(0.1))
        .n_components(2)
        .fit(&train)
        .unwrap();
    let coords = model.transform(&test).unwrap();

    // sign of the first coordinate on each moon of the fitted set
    let moon_sign = |label: usize| {
        let idx = labels.iter().position(|l| *l == label).unwrap();
        model.embedding()[(idx, 0)].signum()
    };

    for (x, label) in coords.column(0).iter().zip(test_labels.iter()) {
        assert_eq!(x.signum(), moon_sign(*label));
    }
}

#[test]
fn sinusoid_families_form_clusters() {
    let mut rng = Xoshiro256Plus::seed_from_u64(5);
    let (samples, labels) =
        fdiff_datasets::sinusoid_families(20, &[1.0, 2.0, 4.0], 50, 0.1, &mut rng).unwrap();

    let model = DiffusionMap::params(l2_gaussian(0.3))
        .n_components(4)
        .alpha(0.5)
        .fit(&samples)
        .unwrap();

    assert_eq!(model.estimate_clusters(), 3);

    // nearest centroid in the two leading coordinates recovers every family
    let coords = model.embedding().slice(ndarray::s![.., ..2]).to_owned();
    let centroids = Array2::from_shape_fn((3, 2), |(family, k)| {
        coords
            .column(k)
            .iter()
            .zip(labels.iter())
            .filter(|(_, l)| **l == family)
            .map(|(x, _)| *x)
            .sum::<f64>()
            / 20.0
    });

    for (row, label) in coords.axis_iter(Axis(0)).zip(labels.iter()) {
        let nearest = (0..3)
            .min_by(|a, b| {
                let da = (&row - &centroids.row(*a)).mapv(|x| x * x).sum();
                let db = (&row - &centroids.row(*b)).mapv(|x| x * x).sum();
                da.partial_cmp(&db).unwrap()
            })
            .unwrap();
        assert_eq!(nearest, *label);
    }
}

#[test]
fn invariant_under_permutation() {
    let samples = random_samples(15, 6, 9);
    let permutation = [4, 11, 0, 7, 14, 2, 9, 5, 12, 1, 8, 13, 3, 10, 6];
    let permuted = samples.select(&permutation);
    let kernel = CurveKernel::gaussian(1.2).unwrap();

    let original = embed(&samples, kernel, 3, 0.5, 2).unwrap();
    let shuffled = embed(&permuted, kernel, 3, 0.5, 2).unwrap();

    let expected = original.select(Axis(0), &permutation);
    for k in 0..3 {
        let (a, b) = (expected.column(k), shuffled.column(k));
        let sign = a.dot(&b).signum();
        assert_abs_diff_eq!(a, &b * sign, epsilon = 1e-8);
    }
}

#[test]
fn more_steps_shrink_coordinates() {
    let samples = random_samples(12, 5, 1);
    let kernel = CurveKernel::gaussian(1.0).unwrap();

    let one = embed(&samples, kernel, 2, 0.0, 1).unwrap();
    let four = embed(&samples, kernel, 2, 0.0, 4).unwrap();

    for (a, b) in one.iter().zip(four.iter()) {
        assert!(b.abs() <= a.abs() + 1e-12);
    }
}

#[test]
fn identical_samples_are_rejected() {
    let grid = Grid::linspace(0.0, 1.0, 4).unwrap();
    let samples = SampleSet::new(grid, Array2::from_elem((3, 4), 0.7)).unwrap();

    let result = embed(&samples, CurveKernel::gaussian(1.0).unwrap(), 1, 0.0, 1);
    assert!(matches!(
        result,
        Err(DiffusionError::RankDeficiency {
            requested: 1,
            available: 0
        })
    ));
}

#[test]
fn narrow_kernel_isolates_every_curve() {
    // constant curves one unit apart, all cross similarities underflow to zero
    let grid = Grid::linspace(0.0, 1.0, 3).unwrap();
    let values = Array2::from_shape_fn((5, 3), |(i, _)| i as f64);
    let samples = SampleSet::new(grid, values).unwrap();
    let kernel = CurveKernel::gaussian(1e-3).unwrap();

    for alpha in &[0.0, 1.0] {
        let result = embed(&samples, kernel, 2, *alpha, 1);
        assert!(matches!(
            result,
            Err(DiffusionError::DegenerateDensity {
                index: 0,
                stage: Stage::Density
            })
        ));
    }

    // wide enough to connect neighbouring curves
    assert!(embed(&samples, CurveKernel::gaussian(1.0).unwrap(), 2, 1.0, 1).is_ok());
}

#[test]
fn alpha_outside_unit_interval() {
    let samples = random_samples(6, 3, 2);

    let result = embed(&samples, CurveKernel::gaussian(1.0).unwrap(), 2, -0.5, 1);
    assert!(matches!(
        result,
        Err(DiffusionError::InvalidParams(DiffusionMapParamsError::Alpha(a))) if a == -0.5
    ));

    let result = embed(&samples, CurveKernel::gaussian(1.0).unwrap(), 2, 0.0, 0);
    assert!(matches!(
        result,
        Err(DiffusionError::InvalidParams(DiffusionMapParamsError::StepsZero))
    ));
}

#[test]
fn grids_must_match() {
    let train = random_samples(8, 5, 4);
    let model = DiffusionMap::params(CurveKernel::gaussian(1.0).unwrap())
        .fit(&train)
        .unwrap();

    let shifted = Grid::linspace(0.1, 1.1, 5).unwrap();
    let other = SampleSet::new(shifted, train.values().to_owned()).unwrap();

    assert!(matches!(
        model.transform(&other),
        Err(DiffusionError::Data(fdiff::Error::GridMismatch(_)))
    ));
}
