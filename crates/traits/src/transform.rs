//! Signal transformation trait definitions.

use polars::prelude::*;

/// Errors that can occur while building or applying a transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Time-series data transformation.
///
/// Operates on long-format data (one row per date and asset), transforming
/// values within each asset in time order.
pub trait TimeSeriesTransform: Send + Sync {
    /// Transform target column, sorted by time and partitioned by asset.
    ///
    /// The frame is expected to be sorted by `time_col` within each
    /// partition before the expression is evaluated.
    ///
    /// # Arguments
    /// * `target_col` - Column to transform
    /// * `time_col` - Column to sort by (typically "date")
    /// * `partition_col` - Column to partition by (typically "symbol")
    ///
    /// # Returns
    /// Polars expression representing the transformation.
    fn transform(&self, target_col: &str, time_col: &str, partition_col: &str) -> Expr;

    /// Returns the name of this transformation.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_error_display() {
        let err = TransformError::InvalidParameter("window must be positive".to_string());
        assert_eq!(err.to_string(), "invalid parameter: window must be positive");
    }
}
