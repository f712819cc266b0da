//! Error types for utility functions.

use statrisk_primitives::PrimitiveError;

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Quantile edges are not unique, so buckets would be empty.
    #[error("bin edges must be unique: {0:?}")]
    DuplicateBinEdges(Vec<f64>),

    /// No value for a date and symbol pair.
    #[error("missing observation for {symbol} on {date}")]
    MissingObservation {
        /// Date of the gap.
        date: String,
        /// Symbol of the gap.
        symbol: String,
    },

    /// More than one value for a date and symbol pair.
    #[error("duplicate observation for {symbol} on {date}")]
    DuplicateObservation {
        /// Date of the duplicate.
        date: String,
        /// Symbol of the duplicate.
        symbol: String,
    },

    /// Invalid labelled data.
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}
