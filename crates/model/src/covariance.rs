//! Factor covariance construction.

use statrisk_math::column_variance;
use statrisk_primitives::{FactorCovMatrix, FactorReturns};
use tracing::debug;

use crate::ModelError;

/// Trading days per year, the default annualization factor for daily data.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub(crate) fn check_annualization(annualization_factor: f64) -> Result<(), ModelError> {
    if annualization_factor.is_finite() && annualization_factor > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidDimension(format!(
            "annualization factor must be positive and finite, got {annualization_factor}"
        )))
    }
}

/// Annualized diagonal covariance of factor returns.
///
/// Each factor's variance uses the sample estimator (divisor T - 1) and is
/// scaled by `annualization_factor`. Off-diagonal entries are exactly zero:
/// principal components are uncorrelated by construction.
///
/// # Errors
/// Returns `ModelError::InsufficientSamples` with fewer than two periods and
/// `ModelError::InvalidDimension` for a non-positive annualization factor.
pub fn factor_cov_matrix(
    factor_returns: &FactorReturns,
    annualization_factor: f64,
) -> Result<FactorCovMatrix, ModelError> {
    check_annualization(annualization_factor)?;

    let variances = column_variance(&factor_returns.values().view(), 1)? * annualization_factor;
    debug!(n_factors = variances.len(), annualization_factor, "built factor covariance");

    Ok(FactorCovMatrix::from_variances(factor_returns.factors().to_vec(), &variances)?)
}
