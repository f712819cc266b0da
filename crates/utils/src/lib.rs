#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statrisk-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod signals;
pub use signals::{LogReturns, LookbackConfig, LookbackHigh, LookbackLow, with_signal};

mod bucket;
pub use bucket::bucket_quantiles;

mod frame;
pub use frame::returns_matrix_from_frame;

mod error;
pub use error::UtilsError;
