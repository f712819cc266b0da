//! Principal component fitter.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use statrisk_math::{
    EigenDecomposition, JacobiConfig, MathError, RandomizedConfig, column_means, covariance,
    jacobi_eigen, orthonormalize_columns, randomized_eigen,
};
use statrisk_traits::{DecompositionError, DecompositionFitter, FactorDecomposition};
use tracing::{debug, warn};

/// The larger axis must exceed this before `Auto` picks the randomized solver.
const AUTO_RANDOMIZED_MIN_DIM: usize = 500;

/// Eigensolver used by [`PcaFitter`].
///
/// The choice changes run time and numerical precision, never output shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvdSolver {
    /// `Randomized` for large inputs with few components, `Full` otherwise.
    #[default]
    Auto,
    /// Exact Jacobi eigendecomposition of the full covariance.
    Full,
    /// Randomized subspace iteration.
    Randomized,
}

/// Configuration for [`PcaFitter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaConfig {
    /// Number of components to keep (K).
    pub n_components: usize,
    /// Eigensolver selection.
    pub solver: SvdSolver,
    /// Extra sketch columns for the randomized solver.
    pub n_oversamples: usize,
    /// Power iterations for the randomized solver.
    pub n_power_iter: usize,
    /// Seed for the randomized solver.
    pub random_state: u64,
    /// Relative off-diagonal tolerance for the Jacobi solver.
    pub tolerance: f64,
    /// Sweep limit for the Jacobi solver.
    pub max_sweeps: usize,
}

impl Default for PcaConfig {
    fn default() -> Self {
        let jacobi = JacobiConfig::default();
        let randomized = RandomizedConfig::default();
        Self {
            n_components: 1,
            solver: SvdSolver::Auto,
            n_oversamples: randomized.n_oversamples,
            n_power_iter: randomized.n_power_iter,
            random_state: randomized.seed,
            tolerance: jacobi.tolerance,
            max_sweeps: jacobi.max_sweeps,
        }
    }
}

impl PcaConfig {
    const fn jacobi(&self) -> JacobiConfig {
        JacobiConfig { tolerance: self.tolerance, max_sweeps: self.max_sweeps }
    }

    const fn randomized(&self) -> RandomizedConfig {
        RandomizedConfig {
            n_oversamples: self.n_oversamples,
            n_power_iter: self.n_power_iter,
            seed: self.random_state,
        }
    }
}

/// Fits principal components to a T x N returns matrix.
///
/// Columns are mean-centred, the N x N sample covariance (divisor T - 1) is
/// eigendecomposed, and the leading K eigenvectors become the components.
/// When there are more assets than periods the T x T Gram matrix
/// `Xc Xc^T / (T - 1)` is decomposed instead and its eigenvectors are lifted
/// to asset space through `Xc^T`; the non-zero spectrum is the same.
/// Each component is sign-normalized so that its largest-magnitude entry is
/// positive.
#[derive(Debug, Clone, Default)]
pub struct PcaFitter {
    config: PcaConfig,
}

impl PcaFitter {
    /// Create a fitter for `n_components` with the given solver and default
    /// tuning.
    #[must_use]
    pub fn new(n_components: usize, solver: SvdSolver) -> Self {
        Self::with_config(PcaConfig { n_components, solver, ..Default::default() })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PcaConfig {
        &self.config
    }

    fn resolve_solver(&self, n_samples: usize, n_features: usize) -> SvdSolver {
        let k = self.config.n_components;
        match self.config.solver {
            SvdSolver::Auto => {
                let large = n_samples.max(n_features) > AUTO_RANDOMIZED_MIN_DIM;
                if large && (k as f64) < 0.8 * n_samples.min(n_features) as f64 {
                    SvdSolver::Randomized
                } else {
                    SvdSolver::Full
                }
            }
            SvdSolver::Randomized => {
                if k + self.config.n_oversamples >= n_samples.min(n_features) {
                    warn!(
                        n_samples,
                        n_features,
                        n_components = k,
                        "randomized solver sketch spans every feature; the full solver is as cheap"
                    );
                }
                SvdSolver::Randomized
            }
            SvdSolver::Full => SvdSolver::Full,
        }
    }

    fn eigen(
        &self,
        matrix: &ArrayView2<'_, f64>,
        k: usize,
        solver: SvdSolver,
    ) -> Result<EigenDecomposition, DecompositionError> {
        match solver {
            SvdSolver::Randomized => {
                randomized_eigen(matrix, k, &self.config.randomized(), &self.config.jacobi())
            }
            SvdSolver::Full | SvdSolver::Auto => {
                jacobi_eigen(matrix, &self.config.jacobi()).map(|d| d.truncate(k))
            }
        }
        .map_err(numerical)
    }
}

impl DecompositionFitter for PcaFitter {
    type Config = PcaConfig;
    type Model = FittedPca;

    fn with_config(config: PcaConfig) -> Self {
        Self { config }
    }

    fn fit(&self, data: &ArrayView2<'_, f64>) -> Result<FittedPca, DecompositionError> {
        let (n_samples, n_features) = data.dim();
        let k = self.config.n_components;
        let max_components = n_samples.min(n_features);

        if k == 0 || k > max_components {
            return Err(DecompositionError::InvalidConfig(format!(
                "n_components={k} must be between 1 and min(n_samples, n_features)={max_components}"
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(DecompositionError::Numerical("returns contain NaN or Inf".to_string()));
        }

        let solver = self.resolve_solver(n_samples, n_features);
        debug!(n_samples, n_features, n_components = k, ?solver, "fitting PCA");

        let mean = column_means(data).map_err(numerical)?;
        let dof = n_samples.saturating_sub(1).max(1) as f64;

        let (decomposition, total_variance) = if n_features > n_samples {
            let centered = data - &mean;
            let gram = centered.dot(&centered.t()) / dof;
            let total_variance = gram.diag().sum();
            let gram_decomposition = self.eigen(&gram.view(), k, solver)?;
            (lift_to_features(&centered.view(), gram_decomposition)?, total_variance)
        } else {
            let cov = covariance(data, 1).map_err(numerical)?;
            let total_variance = cov.diag().sum();
            (self.eigen(&cov.view(), k, solver)?, total_variance)
        };

        let mut components = decomposition.eigenvectors.t().to_owned();
        flip_signs(&mut components);

        // Round-off can leave eigenvalues of a PSD matrix marginally negative.
        let explained_variance = decomposition.eigenvalues.mapv(|v| v.max(0.0));
        let explained_variance_ratio = if total_variance > 0.0 {
            &explained_variance / total_variance
        } else {
            Array1::zeros(k)
        };
        let singular_values = explained_variance.mapv(|v| (v * dof).sqrt());

        debug!(
            explained_variance_ratio = explained_variance_ratio.sum(),
            "PCA fit complete"
        );

        Ok(FittedPca {
            components,
            mean,
            explained_variance,
            explained_variance_ratio,
            singular_values,
            n_samples,
        })
    }
}

fn numerical(err: MathError) -> DecompositionError {
    DecompositionError::Numerical(err.to_string())
}

/// Map Gram eigenvectors `u` (T x K) to covariance eigenvectors
/// `Xc^T u / ||Xc^T u||` (N x K).
///
/// Directions with a zero eigenvalue lift to (near) zero vectors and are
/// replaced by unit vectors orthogonal to the rest.
fn lift_to_features(
    centered: &ArrayView2<'_, f64>,
    gram: EigenDecomposition,
) -> Result<EigenDecomposition, DecompositionError> {
    let lifted = centered.t().dot(&gram.eigenvectors);
    let eigenvectors = orthonormalize_columns(&lifted.view()).map_err(numerical)?;
    Ok(EigenDecomposition { eigenvalues: gram.eigenvalues, eigenvectors })
}

/// Flip each row so its largest-magnitude entry is positive.
fn flip_signs(components: &mut Array2<f64>) {
    for mut row in components.axis_iter_mut(Axis(0)) {
        let mut pivot = 0.0_f64;
        for &v in &row {
            if v.abs() > pivot.abs() {
                pivot = v;
            }
        }
        if pivot < 0.0 {
            row.mapv_inplace(|v| -v);
        }
    }
}

/// Immutable result of a PCA fit.
///
/// Holds the components (K x N), the per-asset mean removed before
/// projection, and fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPca {
    components: Array2<f64>,
    mean: Array1<f64>,
    explained_variance: Array1<f64>,
    explained_variance_ratio: Array1<f64>,
    singular_values: Array1<f64>,
    n_samples: usize,
}

impl FittedPca {
    /// Principal axes, one row per component (K x N).
    #[must_use]
    pub const fn components(&self) -> &Array2<f64> {
        &self.components
    }

    /// Per-asset mean removed before projection.
    #[must_use]
    pub const fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Variance explained by each component.
    #[must_use]
    pub const fn explained_variance(&self) -> &Array1<f64> {
        &self.explained_variance
    }

    /// Fraction of total variance explained by each component.
    #[must_use]
    pub const fn explained_variance_ratio(&self) -> &Array1<f64> {
        &self.explained_variance_ratio
    }

    /// Singular values of the centred data matrix.
    #[must_use]
    pub const fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }

    /// Number of observations seen during fitting.
    #[must_use]
    pub const fn n_samples(&self) -> usize {
        self.n_samples
    }
}

impl FactorDecomposition for FittedPca {
    fn n_components(&self) -> usize {
        self.components.nrows()
    }

    fn n_features(&self) -> usize {
        self.components.ncols()
    }

    fn loadings(&self) -> Array2<f64> {
        self.components.t().to_owned()
    }

    fn transform(&self, data: &ArrayView2<'_, f64>) -> Result<Array2<f64>, DecompositionError> {
        if data.ncols() != self.n_features() {
            return Err(DecompositionError::DimensionMismatch {
                expected: self.n_features(),
                actual: data.ncols(),
                context: "returns columns".to_string(),
            });
        }
        let centered = data - &self.mean;
        Ok(centered.dot(&self.components.t()))
    }
}
