//! Idiosyncratic (specific) variance construction.

use ndarray::{ArrayBase, Data, Dimension};
use statrisk_math::column_variance;
use statrisk_primitives::{
    FactorBetas, FactorReturns, IdiosyncraticVarMatrix, IdiosyncraticVarVector, ReturnsMatrix,
    Symbol, flat_labels,
};
use tracing::debug;

use crate::{ModelError, covariance::check_annualization};

/// Annualized diagonal matrix of per-asset residual variance.
///
/// Common returns are `factor_returns * betas^T`; residuals are the returns
/// minus the common part. Each asset's residual variance uses the
/// **population** estimator (divisor T). This deliberately differs from the
/// sample estimator in [`factor_cov_matrix`](crate::factor_cov_matrix) and is
/// kept for parity with reference outputs.
///
/// # Arguments
/// * `returns` - Asset returns (T x N)
/// * `factor_returns` - Factor returns (T x K)
/// * `betas` - Factor betas (N x K)
/// * `annualization_factor` - Variance scale, e.g. 252 for daily data
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if the inputs disagree on T, N or K,
/// `ModelError::InsufficientSamples` for an empty time axis and
/// `ModelError::InvalidDimension` for a non-positive annualization factor.
pub fn idiosyncratic_var_matrix(
    returns: &ReturnsMatrix,
    factor_returns: &FactorReturns,
    betas: &FactorBetas,
    annualization_factor: f64,
) -> Result<IdiosyncraticVarMatrix, ModelError> {
    check_annualization(annualization_factor)?;

    let (t, n) = returns.shape();
    if factor_returns.n_periods() != t {
        return Err(ModelError::ShapeMismatch(format!(
            "factor returns cover {} periods, returns cover {t}",
            factor_returns.n_periods()
        )));
    }
    if betas.n_assets() != n {
        return Err(ModelError::ShapeMismatch(format!(
            "factor betas cover {} assets, returns cover {n}",
            betas.n_assets()
        )));
    }
    if betas.n_factors() != factor_returns.n_factors() {
        return Err(ModelError::ShapeMismatch(format!(
            "factor betas have {} factors, factor returns have {}",
            betas.n_factors(),
            factor_returns.n_factors()
        )));
    }

    let common = factor_returns.values().dot(&betas.values().t());
    let residuals = returns.values() - &common;
    let variances = column_variance(&residuals.view(), 0)? * annualization_factor;
    debug!(n_assets = n, n_periods = t, annualization_factor, "built idiosyncratic variance");

    Ok(IdiosyncraticVarMatrix::from_variances(returns.symbols().to_vec(), &variances)?)
}

/// Diagonal of the idiosyncratic variance matrix, labelled by asset.
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if `symbols` is not flat or does not
/// have one entry per asset.
pub fn idiosyncratic_var_vector<S, D>(
    matrix: &IdiosyncraticVarMatrix,
    symbols: &ArrayBase<S, D>,
) -> Result<IdiosyncraticVarVector, ModelError>
where
    S: Data<Elem = Symbol>,
    D: Dimension,
{
    let symbols = flat_labels(symbols, matrix.n_assets(), "asset labels")?;
    Ok(IdiosyncraticVarVector::new(symbols, matrix.values().diag().to_owned())?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::{Array1, Array2, array};
    use statrisk_primitives::{Date, FactorName};

    use super::*;

    fn dates(n: usize) -> Vec<Date> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n as u64).map(|i| start + chrono::Days::new(i)).collect()
    }

    fn symbols(n: usize) -> Vec<Symbol> {
        (0..n).map(|i| Symbol::new(format!("S{i}"))).collect()
    }

    #[test]
    fn zero_residual_single_asset() {
        let values = array![[1.0], [2.0], [3.0]];
        let returns = ReturnsMatrix::new(dates(3), symbols(1), values.clone()).unwrap();
        let fr = FactorReturns::new(dates(3), FactorName::principals(1), values).unwrap();
        let betas = FactorBetas::new(symbols(1), FactorName::principals(1), array![[1.0]]).unwrap();

        let idio = idiosyncratic_var_matrix(&returns, &fr, &betas, 252.0).unwrap();
        assert_eq!(idio.values(), &array![[0.0]]);
    }

    #[test]
    fn population_variance_of_residuals() {
        // Residuals: asset 0 -> [1, -1], asset 1 -> [0, 2]
        let returns =
            ReturnsMatrix::new(dates(2), symbols(2), array![[2.0, 1.0], [0.0, 3.0]]).unwrap();
        let fr = FactorReturns::new(dates(2), FactorName::principals(1), array![[1.0], [1.0]])
            .unwrap();
        let betas =
            FactorBetas::new(symbols(2), FactorName::principals(1), array![[1.0], [1.0]]).unwrap();

        let idio = idiosyncratic_var_matrix(&returns, &fr, &betas, 10.0).unwrap();
        assert!(idio.is_diagonal());
        // ddof = 0: Var([1, -1]) = 1, Var([0, 2]) = 1
        assert_relative_eq!(idio.values()[[0, 0]], 10.0, epsilon = 1e-12);
        assert_relative_eq!(idio.values()[[1, 1]], 10.0, epsilon = 1e-12);
        assert_eq!(idio.values()[[0, 1]], 0.0);
    }

    #[test]
    fn rejects_misaligned_periods() {
        let returns = ReturnsMatrix::new(dates(3), symbols(1), array![[1.0], [2.0], [3.0]]).unwrap();
        let fr = FactorReturns::new(dates(2), FactorName::principals(1), array![[1.0], [2.0]])
            .unwrap();
        let betas = FactorBetas::new(symbols(1), FactorName::principals(1), array![[1.0]]).unwrap();
        let err = idiosyncratic_var_matrix(&returns, &fr, &betas, 252.0).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn rejects_empty_time_axis() {
        let returns = ReturnsMatrix::new(vec![], symbols(1), Array2::zeros((0, 1))).unwrap();
        let fr = FactorReturns::new(vec![], FactorName::principals(1), Array2::zeros((0, 1)))
            .unwrap();
        let betas = FactorBetas::new(symbols(1), FactorName::principals(1), array![[1.0]]).unwrap();
        assert!(matches!(
            idiosyncratic_var_matrix(&returns, &fr, &betas, 252.0),
            Err(ModelError::InsufficientSamples { required: 1, actual: 0 })
        ));
    }

    #[test]
    fn vector_is_matrix_diagonal() {
        let matrix = IdiosyncraticVarMatrix::from_variances(symbols(3), &array![0.1, 0.2, 0.3])
            .unwrap();
        let vector = idiosyncratic_var_vector(&matrix, &Array1::from(symbols(3))).unwrap();
        assert_eq!(vector.values(), &array![0.1, 0.2, 0.3]);
        assert_eq!(vector.get("S1"), Some(0.2));
    }

    #[test]
    fn vector_rejects_wrong_label_count() {
        let matrix = IdiosyncraticVarMatrix::from_variances(symbols(2), &array![0.1, 0.2]).unwrap();
        let err = idiosyncratic_var_vector(&matrix, &Array1::from(symbols(3))).unwrap_err();
        assert!(err.is_shape_mismatch());
    }
}
