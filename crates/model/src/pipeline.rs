//! End-to-end risk model construction.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrisk_primitives::{
    FactorBetas, FactorCovMatrix, FactorName, FactorReturns, IdiosyncraticVarMatrix,
    IdiosyncraticVarVector, PortfolioWeights, ReturnsMatrix,
};
use statrisk_traits::DecompositionFitter;
use tracing::debug;

use crate::{
    FittedPca, ModelError, PcaConfig, PcaFitter, RiskDecomposition, SvdSolver,
    TRADING_DAYS_PER_YEAR, factor_betas, factor_cov_matrix, factor_returns,
    idiosyncratic_var_matrix, idiosyncratic_var_vector, predict_portfolio_risk,
    risk_decomposition,
};

/// Configuration for [`StatisticalRiskModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModelConfig {
    /// Number of statistical factors (K).
    pub n_factors: usize,
    /// Eigensolver used for the fit.
    pub solver: SvdSolver,
    /// Variance scale applied to factor and idiosyncratic variance.
    pub annualization_factor: f64,
}

impl Default for RiskModelConfig {
    fn default() -> Self {
        Self { n_factors: 20, solver: SvdSolver::Auto, annualization_factor: TRADING_DAYS_PER_YEAR }
    }
}

/// PCA statistical factor risk model.
///
/// Runs fit, exposure and factor-return extraction, and both variance
/// builders in order over one returns snapshot. Factors are labelled `PC0`,
/// `PC1`, ... in decreasing order of explained variance.
#[derive(Debug, Clone, Default)]
pub struct StatisticalRiskModel {
    config: RiskModelConfig,
}

impl StatisticalRiskModel {
    /// Create a model with the given configuration.
    #[must_use]
    pub const fn new(config: RiskModelConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RiskModelConfig {
        &self.config
    }

    /// Build a risk model snapshot from historical returns.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidDimension` if the factor count does not
    /// fit the returns or the fit fails, and `ModelError::InsufficientSamples`
    /// with fewer than two periods.
    pub fn fit(&self, returns: &ReturnsMatrix) -> Result<RiskModelSnapshot, ModelError> {
        let (t, n) = returns.shape();
        debug!(n_periods = t, n_assets = n, n_factors = self.config.n_factors, "building risk model");

        let fitter = PcaFitter::with_config(PcaConfig {
            n_components: self.config.n_factors,
            solver: self.config.solver,
            ..Default::default()
        });
        let model = fitter.fit(&returns.values().view())?;

        let factors = Array1::from(FactorName::principals(self.config.n_factors));
        let symbols = Array1::from(returns.symbols().to_vec());
        let dates = Array1::from(returns.dates().to_vec());

        let betas = factor_betas(&model, &symbols, &factors)?;
        let factor_returns = factor_returns(&model, returns, &dates, &factors)?;
        let factor_cov = factor_cov_matrix(&factor_returns, self.config.annualization_factor)?;
        let idio_var = idiosyncratic_var_matrix(
            returns,
            &factor_returns,
            &betas,
            self.config.annualization_factor,
        )?;
        let idio_var_vector = idiosyncratic_var_vector(&idio_var, &symbols)?;

        Ok(RiskModelSnapshot {
            model,
            betas,
            factor_returns,
            factor_cov,
            idio_var,
            idio_var_vector,
            annualization_factor: self.config.annualization_factor,
        })
    }
}

/// Every artifact of one risk model run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModelSnapshot {
    model: FittedPca,
    betas: FactorBetas,
    factor_returns: FactorReturns,
    factor_cov: FactorCovMatrix,
    idio_var: IdiosyncraticVarMatrix,
    idio_var_vector: IdiosyncraticVarVector,
    annualization_factor: f64,
}

impl RiskModelSnapshot {
    /// The fitted decomposition.
    #[must_use]
    pub const fn model(&self) -> &FittedPca {
        &self.model
    }

    /// Factor betas (N x K).
    #[must_use]
    pub const fn betas(&self) -> &FactorBetas {
        &self.betas
    }

    /// Factor returns (T x K).
    #[must_use]
    pub const fn factor_returns(&self) -> &FactorReturns {
        &self.factor_returns
    }

    /// Annualized factor covariance (K x K).
    #[must_use]
    pub const fn factor_cov(&self) -> &FactorCovMatrix {
        &self.factor_cov
    }

    /// Annualized idiosyncratic variance (N x N).
    #[must_use]
    pub const fn idio_var(&self) -> &IdiosyncraticVarMatrix {
        &self.idio_var
    }

    /// Idiosyncratic variance per asset.
    #[must_use]
    pub const fn idio_var_vector(&self) -> &IdiosyncraticVarVector {
        &self.idio_var_vector
    }

    /// Annualization factor the variances were scaled by.
    #[must_use]
    pub const fn annualization_factor(&self) -> f64 {
        self.annualization_factor
    }

    /// Predicted risk of a portfolio under this model.
    ///
    /// # Errors
    /// See [`predict_portfolio_risk`].
    pub fn predict_portfolio_risk(&self, weights: &PortfolioWeights) -> Result<f64, ModelError> {
        predict_portfolio_risk(&self.betas, self.factor_cov.values(), &self.idio_var, weights)
    }

    /// Factor and specific risk of a portfolio under this model.
    ///
    /// # Errors
    /// See [`risk_decomposition`].
    pub fn risk_decomposition(
        &self,
        weights: &PortfolioWeights,
    ) -> Result<RiskDecomposition, ModelError> {
        risk_decomposition(&self.betas, self.factor_cov.values(), &self.idio_var, weights)
    }
}
