//! Factor-related type definitions.

use derive_more::Display;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{Date, PrimitiveError, Symbol, variance::is_diagonal};

/// Name of a factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct FactorName(pub String);

impl FactorName {
    /// Create a new factor name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Default label of the `index`-th principal component (`PC0`, `PC1`, ...).
    #[must_use]
    pub fn principal(index: usize) -> Self {
        Self(format!("PC{index}"))
    }

    /// Labels `PC0..PC{count - 1}`.
    #[must_use]
    pub fn principals(count: usize) -> Vec<Self> {
        (0..count).map(Self::principal).collect()
    }

    /// Get the factor name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactorName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FactorName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn check_len(context: &str, expected: usize, actual: usize) -> Result<(), PrimitiveError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PrimitiveError::LengthMismatch { context: context.to_string(), expected, actual })
    }
}

/// Factor loadings: one row per asset, one column per factor (N x K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBetas {
    symbols: Vec<Symbol>,
    factors: Vec<FactorName>,
    values: Array2<f64>,
}

impl FactorBetas {
    /// Create a betas table.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LengthMismatch` if the labels disagree with
    /// the shape of `values`.
    pub fn new(
        symbols: Vec<Symbol>,
        factors: Vec<FactorName>,
        values: Array2<f64>,
    ) -> Result<Self, PrimitiveError> {
        check_len("factor betas rows", values.nrows(), symbols.len())?;
        check_len("factor betas columns", values.ncols(), factors.len())?;
        Ok(Self { symbols, factors, values })
    }

    /// Asset labels (rows).
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Factor labels (columns).
    #[must_use]
    pub fn factors(&self) -> &[FactorName] {
        &self.factors
    }

    /// Loading matrix (n_assets x n_factors).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.values.nrows()
    }

    /// Number of factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.values.ncols()
    }

    /// `(n_assets, n_factors)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Loadings of one asset across all factors.
    #[must_use]
    pub fn exposures(&self, symbol: &str) -> Option<ArrayView1<'_, f64>> {
        self.symbols.iter().position(|s| s.as_str() == symbol).map(|i| self.values.row(i))
    }

    /// Loading of a single asset on a single factor.
    #[must_use]
    pub fn get(&self, symbol: &str, factor: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s.as_str() == symbol)?;
        let j = self.factors.iter().position(|f| f.as_str() == factor)?;
        Some(self.values[[i, j]])
    }
}

/// Factor return time series: one row per period, one column per factor (T x K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorReturns {
    dates: Vec<Date>,
    factors: Vec<FactorName>,
    values: Array2<f64>,
}

impl FactorReturns {
    /// Create a factor returns table.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LengthMismatch` if the labels disagree with
    /// the shape of `values`.
    pub fn new(
        dates: Vec<Date>,
        factors: Vec<FactorName>,
        values: Array2<f64>,
    ) -> Result<Self, PrimitiveError> {
        check_len("factor returns rows", values.nrows(), dates.len())?;
        check_len("factor returns columns", values.ncols(), factors.len())?;
        Ok(Self { dates, factors, values })
    }

    /// Time labels (rows).
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Factor labels (columns).
    #[must_use]
    pub fn factors(&self) -> &[FactorName] {
        &self.factors
    }

    /// Factor return matrix (n_periods x n_factors).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of periods.
    #[must_use]
    pub fn n_periods(&self) -> usize {
        self.values.nrows()
    }

    /// Number of factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.values.ncols()
    }

    /// `(n_periods, n_factors)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// All factor returns on one date.
    #[must_use]
    pub fn row(&self, date: Date) -> Option<ArrayView1<'_, f64>> {
        self.dates.iter().position(|d| *d == date).map(|i| self.values.row(i))
    }

    /// Time series of one factor.
    #[must_use]
    pub fn column(&self, factor: &str) -> Option<ArrayView1<'_, f64>> {
        self.factors.iter().position(|f| f.as_str() == factor).map(|j| self.values.column(j))
    }
}

/// Annualized factor covariance (K x K), diagonal by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorCovMatrix {
    factors: Vec<FactorName>,
    values: Array2<f64>,
}

impl FactorCovMatrix {
    /// Build a diagonal covariance from per-factor variances.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LengthMismatch` if `variances` and `factors`
    /// differ in length.
    pub fn from_variances(
        factors: Vec<FactorName>,
        variances: &Array1<f64>,
    ) -> Result<Self, PrimitiveError> {
        check_len("factor variances", factors.len(), variances.len())?;
        Ok(Self { factors, values: Array2::from_diag(variances) })
    }

    /// Factor labels (rows and columns).
    #[must_use]
    pub fn factors(&self) -> &[FactorName] {
        &self.factors
    }

    /// Covariance matrix (n_factors x n_factors).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.factors.len()
    }

    /// Per-factor variances.
    #[must_use]
    pub fn diagonal(&self) -> Array1<f64> {
        self.values.diag().to_owned()
    }

    /// Whether every off-diagonal entry is exactly zero.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        is_diagonal(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn date(day: u32) -> Date {
        Date::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn principal_labels() {
        assert_eq!(FactorName::principal(3).as_str(), "PC3");
        let names = FactorName::principals(2);
        assert_eq!(names, vec![FactorName::new("PC0"), FactorName::new("PC1")]);
    }

    #[test]
    fn factor_betas_lookup() {
        let betas = FactorBetas::new(
            vec!["AAPL".into(), "MSFT".into()],
            FactorName::principals(2),
            array![[0.7, 0.1], [0.6, -0.2]],
        )
        .unwrap();

        assert_eq!(betas.shape(), (2, 2));
        assert_eq!(betas.get("MSFT", "PC1"), Some(-0.2));
        assert_eq!(betas.get("GOOG", "PC0"), None);
        assert_eq!(betas.exposures("AAPL").unwrap().to_vec(), vec![0.7, 0.1]);
    }

    #[test]
    fn factor_betas_rejects_label_mismatch() {
        let err = FactorBetas::new(
            vec!["AAPL".into()],
            FactorName::principals(1),
            array![[0.7], [0.6]],
        )
        .unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn factor_returns_row_and_column() {
        let returns = FactorReturns::new(
            vec![date(2), date(3)],
            FactorName::principals(2),
            array![[0.01, 0.002], [-0.02, 0.004]],
        )
        .unwrap();

        assert_eq!(returns.shape(), (2, 2));
        assert_eq!(returns.row(date(3)).unwrap().to_vec(), vec![-0.02, 0.004]);
        assert_eq!(returns.column("PC1").unwrap().to_vec(), vec![0.002, 0.004]);
        assert!(returns.row(date(9)).is_none());
    }

    #[test]
    fn factor_cov_is_diagonal() {
        let cov = FactorCovMatrix::from_variances(FactorName::principals(3), &array![0.4, 0.2, 0.1])
            .unwrap();
        assert!(cov.is_diagonal());
        assert_eq!(cov.values()[[1, 1]], 0.2);
        assert_eq!(cov.values()[[0, 2]], 0.0);
        assert_eq!(cov.diagonal(), array![0.4, 0.2, 0.1]);
    }
}
