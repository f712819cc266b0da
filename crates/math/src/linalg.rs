//! Dense linear algebra helpers.

use ndarray::{Array1, Array2, ArrayView2};

use crate::MathError;

/// Relative residual below which a column counts as linearly dependent.
const DEPENDENCE_TOLERANCE: f64 = 1e-10;

/// Orthonormalize the columns of a tall matrix (modified Gram-Schmidt).
///
/// Columns that are linearly dependent on earlier ones are replaced by the
/// next standard basis vector not already in the span, so the output always
/// has the same shape as the input and orthonormal columns.
///
/// # Arguments
/// * `matrix` - Input (n x l), with l <= n
///
/// # Returns
/// Matrix Q (n x l) with Q^T Q = I spanning the input's column space
/// whenever the input has full column rank.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if there are more columns than rows.
pub fn orthonormalize_columns(matrix: &ArrayView2<'_, f64>) -> Result<Array2<f64>, MathError> {
    let (n, l) = matrix.dim();
    if l > n {
        return Err(MathError::DimensionMismatch { expected: n, actual: l });
    }

    let mut q = Array2::<f64>::zeros((n, l));
    let mut next_basis = 0;

    for j in 0..l {
        let mut accepted = project_out(&q, j, matrix.column(j).to_owned());

        while accepted.is_none() {
            let mut e = Array1::<f64>::zeros(n);
            e[next_basis] = 1.0;
            next_basis += 1;
            accepted = project_out(&q, j, e);
        }

        if let Some(column) = accepted {
            q.column_mut(j).assign(&column);
        }
    }

    Ok(q)
}

/// Remove the components of `v` along the first `filled` columns of `q` and
/// normalize; `None` if nothing independent is left.
fn project_out(q: &Array2<f64>, filled: usize, mut v: Array1<f64>) -> Option<Array1<f64>> {
    let original = v.dot(&v).sqrt();
    if original == 0.0 {
        return None;
    }

    // Two passes keep orthogonality tight when columns are nearly dependent.
    for _ in 0..2 {
        for k in 0..filled {
            let basis = q.column(k);
            let proj = basis.dot(&v);
            v.scaled_add(-proj, &basis);
        }
    }

    let norm = v.dot(&v).sqrt();
    if norm <= DEPENDENCE_TOLERANCE * original {
        return None;
    }
    Some(v / norm)
}

/// Symmetric part `(A + A^T) / 2` of a square matrix.
///
/// Used to remove round-off asymmetry before a symmetric eigensolver.
#[must_use]
pub fn symmetric_part(matrix: &ArrayView2<'_, f64>) -> Array2<f64> {
    (matrix + &matrix.t()) / 2.0
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    fn assert_orthonormal(q: &Array2<f64>) {
        let gram = q.t().dot(q);
        for ((i, j), v) in gram.indexed_iter() {
            assert_relative_eq!(*v, if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
        }
    }

    #[test]
    fn orthonormalizes_independent_columns() {
        let m = array![[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]];
        let q = orthonormalize_columns(&m.view()).unwrap();
        assert_orthonormal(&q);

        // First column keeps its direction.
        assert_relative_eq!(q[[0, 0]], 1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(q[[1, 0]], 1.0 / 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn replaces_dependent_columns() {
        let m = array![[1.0, 2.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let q = orthonormalize_columns(&m.view()).unwrap();
        assert_eq!(q.dim(), (3, 3));
        assert_orthonormal(&q);
    }

    #[test]
    fn rejects_wide_matrix() {
        let m = Array2::<f64>::zeros((2, 3));
        assert!(orthonormalize_columns(&m.view()).is_err());
    }

    #[test]
    fn symmetric_part_averages() {
        let m = array![[1.0, 2.0], [4.0, 3.0]];
        let s = symmetric_part(&m.view());
        assert_eq!(s, array![[1.0, 3.0], [3.0, 3.0]]);
    }
}
