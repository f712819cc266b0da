//! Symmetric eigendecomposition.

use ndarray::{Array1, Array2, ArrayView2, s};

use crate::MathError;

/// Result of a symmetric eigendecomposition.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Eigenvalues, sorted in descending order.
    pub eigenvalues: Array1<f64>,
    /// Eigenvectors as columns, in eigenvalue order.
    pub eigenvectors: Array2<f64>,
}

impl EigenDecomposition {
    /// Keep only the leading `k` eigenpairs.
    #[must_use]
    pub fn truncate(self, k: usize) -> Self {
        let k = k.min(self.eigenvalues.len());
        Self {
            eigenvalues: self.eigenvalues.slice(s![..k]).to_owned(),
            eigenvectors: self.eigenvectors.slice(s![.., ..k]).to_owned(),
        }
    }
}

/// Convergence settings for [`jacobi_eigen`].
#[derive(Debug, Clone, Copy)]
pub struct JacobiConfig {
    /// Off-diagonal Frobenius norm, relative to the full norm, at which to stop.
    pub tolerance: f64,
    /// Maximum number of cyclic sweeps.
    pub max_sweeps: usize,
}

impl Default for JacobiConfig {
    fn default() -> Self {
        Self { tolerance: 1e-13, max_sweeps: 100 }
    }
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Each sweep annihilates every off-diagonal pair `(p, q)` in turn with a
/// plane rotation. Stable for covariance matrices of the sizes used in
/// factor models; exact up to `tolerance`.
///
/// # Arguments
/// * `matrix` - Symmetric matrix (n x n)
/// * `config` - Convergence settings
///
/// # Returns
/// Eigenpairs sorted by decreasing eigenvalue.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if `matrix` is not square,
/// `MathError::NumericalInstability` if it contains NaN or Inf, and
/// `MathError::NonConvergence` if `max_sweeps` is exhausted.
pub fn jacobi_eigen(
    matrix: &ArrayView2<'_, f64>,
    config: &JacobiConfig,
) -> Result<EigenDecomposition, MathError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: matrix.ncols() });
    }
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("matrix contains NaN or Inf".to_string()));
    }

    let mut a = matrix.to_owned();
    let mut v = Array2::<f64>::eye(n);

    let norm = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let threshold = config.tolerance * norm.max(f64::MIN_POSITIVE);

    let mut converged = false;
    for _ in 0..config.max_sweeps {
        if off_diagonal_norm(&a) <= threshold {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]] != 0.0 {
                    let (cos_theta, sin_theta) = rotation(a[[p, p]], a[[q, q]], a[[p, q]]);
                    rotate(&mut a, &mut v, p, q, cos_theta, sin_theta);
                }
            }
        }
    }
    if !converged && off_diagonal_norm(&a) > threshold {
        return Err(MathError::NonConvergence { sweeps: config.max_sweeps });
    }

    Ok(sorted_descending(&a.diag().to_owned(), &v))
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    a.indexed_iter().filter(|((i, j), _)| i != j).map(|(_, x)| x * x).sum::<f64>().sqrt()
}

/// Rotation `(cos, sin)` that zeroes `a[p, q]`, taking the smaller angle.
fn rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64) {
    let tau = (aqq - app) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let cos_theta = 1.0 / (1.0 + t * t).sqrt();
    (cos_theta, t * cos_theta)
}

/// Apply `A <- J^T A J` and `V <- V J` for the rotation in plane `(p, q)`.
fn rotate(
    a: &mut Array2<f64>,
    v: &mut Array2<f64>,
    p: usize,
    q: usize,
    cos_theta: f64,
    sin_theta: f64,
) {
    let n = a.nrows();
    let app = a[[p, p]];
    let aqq = a[[q, q]];
    let apq = a[[p, q]];
    let (c, s) = (cos_theta, sin_theta);

    a[[p, p]] = c * c * app - 2.0 * c * s * apq + s * s * aqq;
    a[[q, q]] = s * s * app + 2.0 * c * s * apq + c * c * aqq;
    a[[p, q]] = 0.0;
    a[[q, p]] = 0.0;

    for i in 0..n {
        if i != p && i != q {
            let aip = a[[i, p]];
            let aiq = a[[i, q]];
            a[[i, p]] = c * aip - s * aiq;
            a[[p, i]] = a[[i, p]];
            a[[i, q]] = s * aip + c * aiq;
            a[[q, i]] = a[[i, q]];
        }
    }

    for i in 0..n {
        let vip = v[[i, p]];
        let viq = v[[i, q]];
        v[[i, p]] = c * vip - s * viq;
        v[[i, q]] = s * vip + c * viq;
    }
}

fn sorted_descending(
    eigenvalues: &Array1<f64>,
    eigenvectors: &Array2<f64>,
) -> EigenDecomposition {
    let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
    order.sort_by(|&i, &j| eigenvalues[j].total_cmp(&eigenvalues[i]));

    let values = order.iter().map(|&i| eigenvalues[i]).collect();
    let mut vectors = Array2::<f64>::zeros((eigenvectors.nrows(), order.len()));
    for (new_idx, &old_idx) in order.iter().enumerate() {
        vectors.column_mut(new_idx).assign(&eigenvectors.column(old_idx));
    }

    EigenDecomposition { eigenvalues: values, eigenvectors: vectors }
}
