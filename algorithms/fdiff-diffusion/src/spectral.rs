use fdiff::Float;
use linfa_linalg::eigh::EighInto;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use std::cmp::Ordering;

use crate::error::{DiffusionError, Result};
use crate::transition::TransitionOperator;

/// Eigenpairs of a transition operator
///
/// Eigenvalues are ordered by descending magnitude, ties keep the order of the eigensolver.
/// Column `k` of `eigvecs` is the right eigenvector of the transition operator belonging to
/// eigenvalue `k`, flipped such that its entry of largest magnitude is positive. The first pair
/// is the trivial one, eigenvalue one with a constant eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralDecomposition<F> {
    eigvals: Array1<F>,
    eigvecs: Array2<F>,
}

/// Flips the column such that its entry of largest magnitude (first one on ties) is positive
fn fix_sign<F: Float>(mut column: ArrayViewMut1<F>) {
    let mut pivot = 0;
    let mut largest = F::zero();
    for (i, x) in column.iter().enumerate() {
        if x.abs() > largest {
            largest = x.abs();
            pivot = i;
        }
    }

    if column[pivot] < F::zero() {
        column.mapv_inplace(|x| -x);
    }
}

impl<F: Float> SpectralDecomposition<F> {
    /// Decomposes the symmetric conjugate of `operator` and maps the eigenvectors back
    pub fn from_operator(operator: &TransitionOperator<F>) -> Result<Self> {
        debug!(
            "Eigendecomposition of a {0}x{0} transition operator",
            operator.size()
        );

        let (vals, vecs) = operator.symmetric_conjugate().eigh_into()?;

        let mut order: Vec<usize> = (0..vals.len()).collect();
        order.sort_by(|&a, &b| {
            vals[b]
                .abs()
                .partial_cmp(&vals[a].abs())
                .unwrap_or(Ordering::Equal)
        });

        let eigvals = order.iter().map(|&k| vals[k]).collect::<Array1<F>>();
        let mut eigvecs = vecs.select(Axis(1), &order);

        // v -> D^{-1/2} v
        for (mut row, d) in eigvecs.rows_mut().into_iter().zip(operator.degrees().iter()) {
            row /= d.sqrt();
        }
        for column in eigvecs.columns_mut() {
            fix_sign(column);
        }

        Ok(SpectralDecomposition { eigvals, eigvecs })
    }

    /// All eigenvalues, including the trivial one
    pub fn eigvals(&self) -> ArrayView1<F> {
        self.eigvals.view()
    }

    pub fn eigvecs(&self) -> ArrayView2<F> {
        self.eigvecs.view()
    }

    /// Number of eigenvalues with magnitude above `tolerance`, the trivial one included
    pub fn rank(&self, tolerance: F) -> usize {
        self.eigvals.iter().filter(|x| x.abs() > tolerance).count()
    }

    /// Diffusion coordinates from the `n_components` leading non-trivial eigenpairs
    ///
    /// Column `k` of the embedding is `lambda_k^n_steps psi_k`. Returns the embedding with
    /// dimensionality (N, n_components) together with the unscaled eigenvalues `lambda_k`.
    ///
    /// # Errors
    ///
    /// `RankDeficiency` if less than `n_components` non-trivial eigenvalues exceed `tolerance`
    /// in magnitude.
    pub fn embed(
        &self,
        n_components: usize,
        n_steps: usize,
        tolerance: F,
    ) -> Result<(Array2<F>, Array1<F>)> {
        let available = self.rank(tolerance).saturating_sub(1);
        if available < n_components {
            return Err(DiffusionError::RankDeficiency {
                requested: n_components,
                available,
            });
        }

        let eigvals = self.eigvals.slice(s![1..=n_components]).to_owned();
        let mut embedding = self.eigvecs.slice(s![.., 1..=n_components]).to_owned();

        let steps = F::cast(n_steps);
        for (mut column, val) in embedding.columns_mut().into_iter().zip(eigvals.iter()) {
            column *= val.powf(steps);
        }

        debug!("Retained eigenvalues {}", eigvals);

        Ok((embedding, eigvals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::density_normalize;
    use approx::assert_abs_diff_eq;
    use fdiff_kernel::AffinityMatrix;
    use ndarray::{array, Array};
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand_xoshiro::Xoshiro256Plus;

    fn operator(matrix: Array2<f64>, alpha: f64) -> TransitionOperator<f64> {
        let affinity = AffinityMatrix::from_array(matrix).unwrap();
        let normalized = density_normalize(&affinity, alpha).unwrap();
        TransitionOperator::from_normalized(&normalized)
    }

    fn random_affinity(n: usize) -> Array2<f64> {
        let mut rng = Xoshiro256Plus::seed_from_u64(11);
        let a = Array::random_using((n, n), Uniform::new(0., 1.), &mut rng);
        &a + &a.t()
    }

    #[test]
    fn two_observations() {
        // eigenvalues of the two state walk are 1 and (1 - a) / (1 + a)
        let op = operator(array![[1.0, 0.25], [0.25, 1.0]], 0.0);
        let decomposition = SpectralDecomposition::from_operator(&op).unwrap();

        let expected = array![1.0, 0.6];
        assert_abs_diff_eq!(decomposition.eigvals(), expected.view(), epsilon = 1e-12);
        assert_eq!(decomposition.rank(1e-10), 2);
    }

    #[test]
    fn right_eigenvectors() {
        let op = operator(random_affinity(15), 0.5);
        let decomposition = SpectralDecomposition::from_operator(&op).unwrap();
        let (vals, vecs) = (decomposition.eigvals(), decomposition.eigvecs());

        assert_abs_diff_eq!(vals[0], 1.0, epsilon = 1e-10);
        for k in 1..15 {
            assert!(vals[k - 1].abs() >= vals[k].abs());
        }

        for k in 0..15 {
            let psi = vecs.column(k);
            assert_abs_diff_eq!(op.view().dot(&psi), &psi * vals[k], epsilon = 1e-10);
        }

        // the trivial eigenvector is constant
        let trivial = vecs.column(0);
        assert_abs_diff_eq!(trivial, Array1::from_elem(15, trivial[0]), epsilon = 1e-10);
        assert!(trivial[0] > 0.0);
    }

    #[test]
    fn deterministic_signs() {
        let op = operator(random_affinity(10), 0.0);
        let decomposition = SpectralDecomposition::from_operator(&op).unwrap();

        for column in decomposition.eigvecs().columns() {
            let largest = column.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
            let first = column.iter().find(|x| x.abs() == largest).unwrap();
            assert!(*first > 0.0);
        }
    }

    #[test]
    fn embedding_scales_with_steps() {
        let op = operator(random_affinity(8), 0.0);
        let decomposition = SpectralDecomposition::from_operator(&op).unwrap();

        let (one, vals) = decomposition.embed(3, 1, 1e-10).unwrap();
        let (three, vals3) = decomposition.embed(3, 3, 1e-10).unwrap();

        assert_eq!(one.dim(), (8, 3));
        assert_abs_diff_eq!(vals, vals3);
        let vecs = decomposition.eigvecs();
        for k in 0..3 {
            let psi = vecs.column(k + 1);
            assert_abs_diff_eq!(one.column(k), &psi * vals[k], epsilon = 1e-14);
            assert_abs_diff_eq!(three.column(k), &psi * vals[k].powi(3), epsilon = 1e-14);
        }
    }

    #[test]
    fn identical_observations_are_rank_deficient() {
        let op = operator(Array2::ones((3, 3)), 0.0);
        let decomposition = SpectralDecomposition::from_operator(&op).unwrap();

        assert_eq!(decomposition.rank(1e-10), 1);
        assert!(matches!(
            decomposition.embed(1, 1, 1e-10),
            Err(DiffusionError::RankDeficiency {
                requested: 1,
                available: 0
            })
        ));
    }
}
