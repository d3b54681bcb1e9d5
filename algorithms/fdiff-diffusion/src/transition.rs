//! Markov transition operator of the diffusion process
use fdiff::Float;
use log::trace;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::normalize::DensityNormalized;

/// Row stochastic matrix of single step transition probabilities
///
/// Entry (i, j) is the probability that the random walk moves from observation `i` to `j` in a
/// single step. The operator is generally not symmetric, but it is conjugate to the symmetric
/// matrix returned by [`symmetric_conjugate`](TransitionOperator::symmetric_conjugate) and
/// therefore has real eigenvalues in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOperator<F> {
    matrix: Array2<F>,
    degrees: Array1<F>,
}

impl<F: Float> TransitionOperator<F> {
    /// Divides every row of the normalized affinity matrix by its sum
    ///
    /// [`density_normalize`](crate::density_normalize) only succeeds when every observation has
    /// a positive similarity to some other observation, so all row sums are positive here.
    pub fn from_normalized(normalized: &DensityNormalized<F>) -> Self {
        let degrees = normalized.degrees();

        let mut matrix = normalized.view().to_owned();
        Zip::from(matrix.rows_mut())
            .and(&degrees)
            .par_for_each(|mut row, &d| row /= d);

        trace!("Transition operator degrees: {}", degrees);

        TransitionOperator { matrix, degrees }
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn view(&self) -> ArrayView2<F> {
        self.matrix.view()
    }

    pub fn into_inner(self) -> Array2<F> {
        self.matrix
    }

    /// Row sums `d'` of the normalized affinity matrix the operator was built from
    pub fn degrees(&self) -> ArrayView1<F> {
        self.degrees.view()
    }

    /// Should be one everywhere, up to rounding
    pub fn row_sums(&self) -> Array1<F> {
        self.matrix.sum_axis(Axis(1))
    }

    /// Invariant distribution `pi` of the walk, with `pi P = pi`
    pub fn stationary_distribution(&self) -> Array1<F> {
        &self.degrees / self.degrees.sum()
    }

    /// The symmetric matrix `S = D^{1/2} P D^{-1/2}`, with `D = diag(d')`
    ///
    /// `S` shares its eigenvalues with `P`, an eigenvector `v` of `S` maps to the right
    /// eigenvector `D^{-1/2} v` of `P`. Both triangles are averaged to remove the rounding noise
    /// of the row normalization.
    pub fn symmetric_conjugate(&self) -> Array2<F> {
        let n = self.size();
        let sqrt_d = self.degrees.mapv(|d| d.sqrt());
        let half = F::cast(0.5);

        let mut conjugate = Array2::zeros((n, n));
        Zip::indexed(&mut conjugate).par_for_each(|(i, j), s| {
            let forward = self.matrix[(i, j)] * sqrt_d[i] / sqrt_d[j];
            let backward = self.matrix[(j, i)] * sqrt_d[j] / sqrt_d[i];
            *s = half * (forward + backward);
        });

        conjugate
    }

    /// Transition probabilities after `n_steps` steps, `P^n_steps`
    ///
    /// Computed by repeated squaring. The embedding never uses this matrix, it scales the
    /// eigenvalues instead.
    pub fn power(&self, n_steps: usize) -> Array2<F> {
        let mut result = Array2::eye(self.size());
        let mut base = self.matrix.clone();
        let mut exp = n_steps;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.dot(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.dot(&base);
            }
        }

        result
    }

    /// Shannon entropy of every row of `P^n_steps`
    pub fn row_entropy(&self, n_steps: usize) -> Array1<F> {
        self.power(n_steps).map_axis(Axis(1), |row| {
            -row.iter()
                .filter(|p| **p > F::zero())
                .map(|p| *p * p.ln())
                .sum::<F>()
        })
    }

    /// Kullback-Leibler divergence of every row of `P^n_steps` from the stationary distribution
    ///
    /// Never increases with the number of steps and approaches zero for a connected graph.
    pub fn divergence_from_stationary(&self, n_steps: usize) -> Array1<F> {
        let stationary = self.stationary_distribution();

        self.power(n_steps).map_axis(Axis(1), |row| {
            row.iter()
                .zip(stationary.iter())
                .filter(|(p, _)| **p > F::zero())
                .map(|(p, pi)| *p * (*p / *pi).ln())
                .sum::<F>()
        })
    }
}
