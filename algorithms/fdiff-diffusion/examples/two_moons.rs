use fdiff::prelude::*;
use fdiff_diffusion::DiffusionMap;
use fdiff_kernel::{CurveKernel, Metric};

use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Two interleaving moons, lifted to curves: embed them with a diffusion map, then place a few
// fresh curves into the fitted coordinates.
fn main() {
    // Our random number generator, seeded for reproducibility
    let mut rng = Xoshiro256Plus::seed_from_u64(42);

    let (train, labels) = fdiff_datasets::two_moons_curves(100, 64, 0.05, &mut rng).unwrap();
    let (test, test_labels) = fdiff_datasets::two_moons_curves(5, 64, 0.05, &mut rng).unwrap();

    // gaussian kernel on the integrated squared difference of two curves
    let kernel = CurveKernel::params()
        .metric(Metric::L2)
        .length_scale(0.1)
        .check()
        .unwrap();

    let model = DiffusionMap::params(kernel)
        .n_components(2)
        .alpha(0.5)
        .fit(&train)
        .unwrap();

    println!("eigenvalues: {}", model.eigvals());
    println!("estimated clusters: {}", model.estimate_clusters());

    for (row, label) in model.embedding().rows().into_iter().zip(labels.iter()).step_by(20) {
        println!("moon {}: {}", label, row);
    }

    let coords = model.transform(&test).unwrap();
    for (row, label) in coords.rows().into_iter().zip(test_labels.iter()) {
        println!("unseen, moon {}: {}", label, row);
    }
}
