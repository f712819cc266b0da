//! Randomized subspace iteration for the leading eigenpairs.

use ndarray::{Array2, ArrayView2};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StandardNormal};

use crate::{
    EigenDecomposition, JacobiConfig, MathError, jacobi_eigen, orthonormalize_columns,
    symmetric_part,
};

/// Settings for [`randomized_eigen`].
#[derive(Debug, Clone, Copy)]
pub struct RandomizedConfig {
    /// Extra sketch columns beyond the requested rank.
    pub n_oversamples: usize,
    /// Number of power iterations applied to the sketch.
    pub n_power_iter: usize,
    /// Seed for the Gaussian test matrix.
    pub seed: u64,
}

impl Default for RandomizedConfig {
    fn default() -> Self {
        Self { n_oversamples: 10, n_power_iter: 7, seed: 0 }
    }
}

/// Leading `rank` eigenpairs of a symmetric positive semi-definite matrix.
///
/// Builds an orthonormal basis Q for the range of `A * Omega` (refined by
/// power iterations), then solves the small projected problem `Q^T A Q`
/// exactly with [`jacobi_eigen`]. Results are deterministic for a fixed
/// `seed`.
///
/// # Arguments
/// * `matrix` - Symmetric matrix (n x n)
/// * `rank` - Number of eigenpairs to return, `1..=n`
/// * `config` - Sketch size, power iterations, and seed
/// * `jacobi` - Convergence settings for the projected problem
///
/// # Errors
/// Returns `MathError::InvalidParameter` if `rank` is out of range and
/// propagates errors from the dense solver.
pub fn randomized_eigen(
    matrix: &ArrayView2<'_, f64>,
    rank: usize,
    config: &RandomizedConfig,
    jacobi: &JacobiConfig,
) -> Result<EigenDecomposition, MathError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: matrix.ncols() });
    }
    if rank == 0 || rank > n {
        return Err(MathError::InvalidParameter(format!("rank must be in 1..={n}, got {rank}")));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("matrix contains NaN or Inf".to_string()));
    }

    let sketch_cols = (rank + config.n_oversamples).min(n);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let omega = Array2::from_shape_fn((n, sketch_cols), |_| {
        let draw: f64 = StandardNormal.sample(&mut rng);
        draw
    });

    let mut q = orthonormalize_columns(&matrix.dot(&omega).view())?;
    for _ in 0..config.n_power_iter {
        q = orthonormalize_columns(&matrix.dot(&q).view())?;
    }

    let projected = q.t().dot(matrix).dot(&q);
    let small = jacobi_eigen(&symmetric_part(&projected.view()).view(), jacobi)?;

    Ok(EigenDecomposition { eigenvalues: small.eigenvalues, eigenvectors: q.dot(&small.eigenvectors) }
        .truncate(rank))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::Array1;

    use super::*;

    fn spiked_matrix(n: usize) -> Array2<f64> {
        // Two strong directions on top of a small isotropic floor.
        let u = Array1::from_shape_fn(n, |i| if i % 2 == 0 { 1.0 } else { -1.0 }) / (n as f64).sqrt();
        let v = Array1::from_shape_fn(n, |i| if i < n / 2 { 1.0 } else { 0.0 }) / ((n / 2) as f64).sqrt();
        let uu = u.view().insert_axis(ndarray::Axis(1));
        let vv = v.view().insert_axis(ndarray::Axis(1));
        uu.dot(&uu.t()) * 10.0 + vv.dot(&vv.t()) * 4.0 + Array2::<f64>::eye(n) * 0.01
    }

    #[test]
    fn matches_dense_solver_on_leading_pairs() {
        let m = spiked_matrix(20);
        let dense = jacobi_eigen(&m.view(), &JacobiConfig::default()).unwrap().truncate(2);
        let approx =
            randomized_eigen(&m.view(), 2, &RandomizedConfig::default(), &JacobiConfig::default())
                .unwrap();

        for k in 0..2 {
            assert_relative_eq!(approx.eigenvalues[k], dense.eigenvalues[k], epsilon = 1e-8);
            let overlap = approx.eigenvectors.column(k).dot(&dense.eigenvectors.column(k));
            assert_relative_eq!(overlap.abs(), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let m = spiked_matrix(12);
        let config = RandomizedConfig { seed: 42, ..Default::default() };
        let a = randomized_eigen(&m.view(), 3, &config, &JacobiConfig::default()).unwrap();
        let b = randomized_eigen(&m.view(), 3, &config, &JacobiConfig::default()).unwrap();
        assert_eq!(a.eigenvalues, b.eigenvalues);
        assert_eq!(a.eigenvectors, b.eigenvectors);
    }

    #[test]
    fn rejects_rank_out_of_range() {
        let m = spiked_matrix(4);
        let config = RandomizedConfig::default();
        assert!(randomized_eigen(&m.view(), 0, &config, &JacobiConfig::default()).is_err());
        assert!(randomized_eigen(&m.view(), 5, &config, &JacobiConfig::default()).is_err());
    }
}
