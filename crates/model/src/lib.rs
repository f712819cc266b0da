#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statrisk-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod pca;
pub use pca::{FittedPca, PcaConfig, PcaFitter, SvdSolver};

mod exposures;
pub use exposures::factor_betas;

mod factor_returns;
pub use factor_returns::factor_returns;

mod covariance;
pub use covariance::{TRADING_DAYS_PER_YEAR, factor_cov_matrix};

mod idiosyncratic;
pub use idiosyncratic::{idiosyncratic_var_matrix, idiosyncratic_var_vector};

mod portfolio;
pub use portfolio::{RiskDecomposition, predict_portfolio_risk, risk_decomposition};

mod pipeline;
pub use pipeline::{RiskModelConfig, RiskModelSnapshot, StatisticalRiskModel};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use statrisk_traits::{DecompositionFitter, FactorDecomposition};

    pub use super::{
        ModelError, PcaFitter, RiskModelConfig, RiskModelSnapshot, StatisticalRiskModel,
        SvdSolver,
    };
}
