//! Column statistics over T x N observation matrices.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::MathError;

/// Mean of each column.
///
/// # Errors
/// Returns `MathError::EmptyData` if the matrix has no rows.
pub fn column_means(matrix: &ArrayView2<'_, f64>) -> Result<Array1<f64>, MathError> {
    matrix.mean_axis(Axis(0)).ok_or(MathError::EmptyData)
}

/// Variance of each column with `ddof` delta degrees of freedom.
///
/// # Arguments
/// * `matrix` - Observations (T x N)
/// * `ddof` - Divisor is `T - ddof`
///
/// # Errors
/// Returns `MathError::InsufficientObservations` unless `T > ddof`.
pub fn column_variance(matrix: &ArrayView2<'_, f64>, ddof: usize) -> Result<Array1<f64>, MathError> {
    let t = matrix.nrows();
    if t <= ddof {
        return Err(MathError::InsufficientObservations { required: ddof + 1, actual: t });
    }
    Ok(matrix.var_axis(Axis(0), ddof as f64))
}

/// Sample covariance of the columns, `Xc^T Xc / (T - ddof)`.
///
/// The divisor is clamped to 1 so a single observation yields a zero
/// matrix rather than a division by zero.
///
/// # Errors
/// Returns `MathError::EmptyData` if the matrix has no rows.
pub fn covariance(matrix: &ArrayView2<'_, f64>, ddof: usize) -> Result<Array2<f64>, MathError> {
    let means = column_means(matrix)?;
    let centered = matrix - &means;
    let divisor = matrix.nrows().saturating_sub(ddof).max(1) as f64;
    Ok(centered.t().dot(&centered) / divisor)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn means_per_column() {
        let m = array![[1.0, 10.0], [3.0, 20.0]];
        assert_eq!(column_means(&m.view()).unwrap(), array![2.0, 15.0]);
    }

    #[test]
    fn means_of_empty_matrix() {
        let m = Array2::<f64>::zeros((0, 3));
        assert!(matches!(column_means(&m.view()), Err(MathError::EmptyData)));
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 2.0)]
    fn variance_respects_ddof(#[case] ddof: usize, #[case] expected: f64) {
        let m = array![[1.0], [3.0]];
        let var = column_variance(&m.view(), ddof).unwrap();
        assert_relative_eq!(var[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn variance_needs_more_rows_than_ddof() {
        let m = array![[1.0, 2.0]];
        assert!(matches!(
            column_variance(&m.view(), 1),
            Err(MathError::InsufficientObservations { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn covariance_matches_hand_computation() {
        let m = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let cov = covariance(&m.view(), 1).unwrap();
        assert_relative_eq!(cov[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(cov[[0, 1]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(cov[[1, 1]], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn covariance_of_single_row_is_zero() {
        let m = array![[1.0, 2.0, 3.0]];
        let cov = covariance(&m.view(), 1).unwrap();
        assert!(cov.iter().all(|&v| v == 0.0));
    }
}
