//! Price-derived signals.

use std::f64::consts::E;

use polars::prelude::*;
use statrisk_traits::{TimeSeriesTransform, TransformError};

/// Window settings for lookback signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackConfig {
    /// Number of observations in the window, current one included.
    pub window: usize,
    /// Observations required before a value is emitted.
    pub min_periods: usize,
}

impl Default for LookbackConfig {
    fn default() -> Self {
        Self { window: 20, min_periods: 20 }
    }
}

impl LookbackConfig {
    fn validate(self) -> Result<Self, TransformError> {
        if self.window == 0 {
            return Err(TransformError::InvalidParameter("window must be positive".to_string()));
        }
        if self.min_periods == 0 || self.min_periods > self.window {
            return Err(TransformError::InvalidParameter(format!(
                "min_periods must be in 1..={}, got {}",
                self.window, self.min_periods
            )));
        }
        Ok(self)
    }

    fn rolling_options(self) -> RollingOptionsFixedWindow {
        RollingOptionsFixedWindow {
            window_size: self.window,
            min_periods: self.min_periods,
            ..Default::default()
        }
    }
}

/// Log return `ln(p_t / p_{t-1})` per symbol.
///
/// The first observation of each symbol is null.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReturns;

impl TimeSeriesTransform for LogReturns {
    fn transform(&self, target_col: &str, _time_col: &str, partition_col: &str) -> Expr {
        (col(target_col) / col(target_col).shift(lit(1))).log(E).over([col(partition_col)])
    }

    fn name(&self) -> &str {
        "log_returns"
    }
}

/// Rolling maximum over a trailing window per symbol.
#[derive(Debug, Clone, Copy)]
pub struct LookbackHigh {
    config: LookbackConfig,
}

impl LookbackHigh {
    /// Create a lookback high signal.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` for a zero window or a
    /// `min_periods` outside `1..=window`.
    pub fn with_config(config: LookbackConfig) -> Result<Self, TransformError> {
        Ok(Self { config: config.validate()? })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &LookbackConfig {
        &self.config
    }
}

impl TimeSeriesTransform for LookbackHigh {
    fn transform(&self, target_col: &str, _time_col: &str, partition_col: &str) -> Expr {
        col(target_col).rolling_max(self.config.rolling_options()).over([col(partition_col)])
    }

    fn name(&self) -> &str {
        "lookback_high"
    }
}

/// Rolling minimum over a trailing window per symbol.
#[derive(Debug, Clone, Copy)]
pub struct LookbackLow {
    config: LookbackConfig,
}

impl LookbackLow {
    /// Create a lookback low signal.
    ///
    /// # Errors
    /// Returns `TransformError::InvalidParameter` for a zero window or a
    /// `min_periods` outside `1..=window`.
    pub fn with_config(config: LookbackConfig) -> Result<Self, TransformError> {
        Ok(Self { config: config.validate()? })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &LookbackConfig {
        &self.config
    }
}

impl TimeSeriesTransform for LookbackLow {
    fn transform(&self, target_col: &str, _time_col: &str, partition_col: &str) -> Expr {
        col(target_col).rolling_min(self.config.rolling_options()).over([col(partition_col)])
    }

    fn name(&self) -> &str {
        "lookback_low"
    }
}

/// Sort by partition then time and append a signal column.
///
/// # Arguments
/// * `df` - Input LazyFrame in long format
/// * `signal` - Transformation to apply
/// * `target_col` - Column the signal reads
/// * `time_col` - Column to sort by (typically "date")
/// * `partition_col` - Column to partition by (typically "symbol")
///
/// # Returns
/// LazyFrame with an extra column named after the signal.
pub fn with_signal(
    df: LazyFrame,
    signal: &dyn TimeSeriesTransform,
    target_col: &str,
    time_col: &str,
    partition_col: &str,
) -> LazyFrame {
    let sort_options = SortMultipleOptions::new().with_maintain_order(true);
    df.sort([partition_col, time_col], sort_options).with_column(
        signal.transform(target_col, time_col, partition_col).alias(signal.name()),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn prices() -> LazyFrame {
        df! {
            "date" => &[3, 1, 2, 1, 2, 3],
            "symbol" => &["A", "A", "A", "B", "B", "B"],
            "close" => &[40.0, 10.0, 20.0, 100.0, 50.0, 75.0],
        }
        .unwrap()
        .lazy()
    }

    fn column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn log_returns_per_symbol() {
        let result = with_signal(prices(), &LogReturns, "close", "date", "symbol").collect().unwrap();
        let values = column(&result, "log_returns");

        assert_eq!(values[0], None);
        assert_relative_eq!(values[1].unwrap(), 2f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(values[2].unwrap(), 2f64.ln(), epsilon = 1e-12);
        // Symbols do not leak into each other.
        assert_eq!(values[3], None);
        assert_relative_eq!(values[4].unwrap(), 0.5f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(values[5].unwrap(), 1.5f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn lookback_high_and_low() {
        let config = LookbackConfig { window: 2, min_periods: 1 };
        let high = LookbackHigh::with_config(config).unwrap();
        let low = LookbackLow::with_config(config).unwrap();

        let result = with_signal(prices(), &high, "close", "date", "symbol");
        let result = with_signal(result, &low, "close", "date", "symbol").collect().unwrap();

        assert_eq!(
            column(&result, "lookback_high"),
            vec![Some(10.0), Some(20.0), Some(40.0), Some(100.0), Some(100.0), Some(75.0)]
        );
        assert_eq!(
            column(&result, "lookback_low"),
            vec![Some(10.0), Some(10.0), Some(20.0), Some(100.0), Some(50.0), Some(50.0)]
        );
    }

    #[test]
    fn lookback_waits_for_min_periods() {
        let high = LookbackHigh::with_config(LookbackConfig { window: 3, min_periods: 3 }).unwrap();
        let result = with_signal(prices(), &high, "close", "date", "symbol").collect().unwrap();
        assert_eq!(
            column(&result, "lookback_high"),
            vec![None, None, Some(40.0), None, None, Some(100.0)]
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 0)]
    #[case(5, 6)]
    fn rejects_bad_windows(#[case] window: usize, #[case] min_periods: usize) {
        let config = LookbackConfig { window, min_periods };
        assert!(matches!(
            LookbackHigh::with_config(config),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(matches!(
            LookbackLow::with_config(config),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn signal_names() {
        assert_eq!(LogReturns.name(), "log_returns");
        let config = LookbackConfig::default();
        assert_eq!(LookbackHigh::with_config(config).unwrap().name(), "lookback_high");
        assert_eq!(LookbackLow::with_config(config).unwrap().name(), "lookback_low");
    }
}
