#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statrisk-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod decomposition;
pub use decomposition::{DecompositionError, DecompositionFitter, FactorDecomposition};

mod transform;
pub use transform::{TimeSeriesTransform, TransformError};
