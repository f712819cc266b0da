#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statrisk-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod eigen;
pub use eigen::{EigenDecomposition, JacobiConfig, jacobi_eigen};

mod randomized;
pub use randomized::{RandomizedConfig, randomized_eigen};

mod linalg;
pub use linalg::{orthonormalize_columns, symmetric_part};

mod stats;
pub use stats::{column_means, column_variance, covariance};

mod error;
pub use error::MathError;
