//! # statrisk
//!
//! A PCA statistical factor risk model.
//!
//! This crate provides a unified interface to the statrisk crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Labelled matrix and vector types
//! - `traits`: Decomposition and transform traits
//! - `math`: Eigensolvers and column statistics
//! - `model`: PCA fit, factor and idiosyncratic variance, portfolio risk
//! - `utils`: Signals, quantile buckets, frame pivoting
//!
//! ## Example
//!
//! ```rust,ignore
//! use statrisk::model::{RiskModelConfig, StatisticalRiskModel};
//! use statrisk::primitives::PortfolioWeights;
//!
//! let snapshot = StatisticalRiskModel::new(RiskModelConfig::default()).fit(&returns)?;
//! let risk = snapshot.predict_portfolio_risk(&PortfolioWeights::equal(returns.n_assets()))?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use statrisk_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use statrisk_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use statrisk_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use statrisk_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use statrisk_utils as utils;
