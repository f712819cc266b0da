#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statrisk-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::Symbol;

mod factor;
pub use factor::{FactorBetas, FactorCovMatrix, FactorName, FactorReturns};

mod returns;
pub use returns::ReturnsMatrix;

mod variance;
pub use variance::{IdiosyncraticVarMatrix, IdiosyncraticVarVector};

mod weights;
pub use weights::PortfolioWeights;

mod shape;
pub use shape::{flat_labels, matrix_view};

mod error;
pub use error::PrimitiveError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
