//! Portfolio risk prediction.

use ndarray::{Array1, ArrayBase, ArrayView2, Data, Dimension};
use serde::{Deserialize, Serialize};
use statrisk_primitives::{FactorBetas, IdiosyncraticVarMatrix, PortfolioWeights, matrix_view};
use tracing::debug;

use crate::ModelError;

/// Portfolio risk split into its factor and specific parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDecomposition {
    /// Portfolio exposure to each factor, `B^T w`.
    pub factor_exposures: Array1<f64>,
    /// Standard deviation from common factors.
    pub factor_risk: f64,
    /// Standard deviation from idiosyncratic variance.
    pub specific_risk: f64,
    /// Total standard deviation.
    pub total_risk: f64,
}

impl RiskDecomposition {
    /// Share of total variance explained by factors, in `[0, 1]`.
    ///
    /// Zero for a riskless portfolio.
    #[must_use]
    pub const fn factor_share(&self) -> f64 {
        let total_var = self.total_risk * self.total_risk;
        if total_var > 0.0 { self.factor_risk * self.factor_risk / total_var } else { 0.0 }
    }
}

struct Inputs<'a> {
    betas: &'a FactorBetas,
    factor_cov: ArrayView2<'a, f64>,
    idio: &'a IdiosyncraticVarMatrix,
    weights: &'a Array1<f64>,
}

fn validate<'a, S, D>(
    betas: &'a FactorBetas,
    factor_cov: &'a ArrayBase<S, D>,
    idio: &'a IdiosyncraticVarMatrix,
    weights: &'a PortfolioWeights,
) -> Result<Inputs<'a>, ModelError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (n, k) = betas.shape();
    let factor_cov = matrix_view(factor_cov, k, k, "factor covariance")?;
    if idio.n_assets() != n {
        return Err(ModelError::ShapeMismatch(format!(
            "idiosyncratic variance covers {} assets, factor betas cover {n}",
            idio.n_assets()
        )));
    }
    if weights.len() != n {
        return Err(ModelError::ShapeMismatch(format!(
            "portfolio has {} weights, factor betas cover {n} assets",
            weights.len()
        )));
    }
    Ok(Inputs { betas, factor_cov, idio, weights: weights.as_array() })
}

fn checked_sqrt(variance: f64, what: &str) -> Result<f64, ModelError> {
    if !variance.is_finite() {
        return Err(ModelError::NumericalInstability(format!("{what} variance is {variance}")));
    }
    if variance < 0.0 {
        return Err(ModelError::NumericalInstability(format!(
            "{what} variance is negative ({variance:e})"
        )));
    }
    Ok(variance.sqrt())
}

/// Predicted portfolio risk, `sqrt(w^T (B F B^T + S) w)`.
///
/// # Arguments
/// * `betas` - Factor betas (N x K)
/// * `factor_cov` - Factor covariance, must be exactly 2-dimensional (K x K)
/// * `idio` - Idiosyncratic variance matrix (N x N)
/// * `weights` - Portfolio weights in betas row order (N)
///
/// # Returns
/// The annualized standard deviation of the portfolio return.
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if any input disagrees on N or K or
/// `factor_cov` is not 2-dimensional. Returns
/// `ModelError::NumericalInstability` if the quadratic form is negative or
/// not finite; it is never clamped.
pub fn predict_portfolio_risk<S, D>(
    betas: &FactorBetas,
    factor_cov: &ArrayBase<S, D>,
    idio: &IdiosyncraticVarMatrix,
    weights: &PortfolioWeights,
) -> Result<f64, ModelError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let inputs = validate(betas, factor_cov, idio, weights)?;
    let b = inputs.betas.values();
    let w = inputs.weights;

    let portfolio_cov = b.dot(&inputs.factor_cov).dot(&b.t()) + inputs.idio.values();
    let variance = w.dot(&portfolio_cov.dot(w));
    let risk = checked_sqrt(variance, "portfolio")?;

    debug!(n_assets = w.len(), risk, "predicted portfolio risk");
    Ok(risk)
}

/// Split predicted portfolio risk into factor and specific components.
///
/// Factor variance is `(B^T w)^T F (B^T w)` and specific variance is
/// `w^T S w`; their sum equals the quadratic form used by
/// [`predict_portfolio_risk`].
///
/// # Errors
/// Same conditions as [`predict_portfolio_risk`], applied to each component.
pub fn risk_decomposition<S, D>(
    betas: &FactorBetas,
    factor_cov: &ArrayBase<S, D>,
    idio: &IdiosyncraticVarMatrix,
    weights: &PortfolioWeights,
) -> Result<RiskDecomposition, ModelError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let inputs = validate(betas, factor_cov, idio, weights)?;
    let w = inputs.weights;

    let factor_exposures = inputs.betas.values().t().dot(w);
    let factor_var = factor_exposures.dot(&inputs.factor_cov.dot(&factor_exposures));
    let specific_var = w.dot(&inputs.idio.values().dot(w));

    let factor_risk = checked_sqrt(factor_var, "factor")?;
    let specific_risk = checked_sqrt(specific_var, "specific")?;
    let total_risk = checked_sqrt(factor_var + specific_var, "portfolio")?;

    Ok(RiskDecomposition { factor_exposures, factor_risk, specific_risk, total_risk })
}
