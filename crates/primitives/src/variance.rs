//! Idiosyncratic (specific) variance types.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{PrimitiveError, Symbol};

pub(crate) fn is_diagonal(m: &Array2<f64>) -> bool {
    m.indexed_iter().all(|((i, j), v)| i == j || *v == 0.0)
}

/// Annualized per-asset residual variance on the diagonal of an N x N matrix.
///
/// No cross-asset residual covariance is modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdiosyncraticVarMatrix {
    symbols: Vec<Symbol>,
    values: Array2<f64>,
}

impl IdiosyncraticVarMatrix {
    /// Build the diagonal matrix from per-asset variances.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LengthMismatch` if `variances` and `symbols`
    /// differ in length.
    pub fn from_variances(
        symbols: Vec<Symbol>,
        variances: &Array1<f64>,
    ) -> Result<Self, PrimitiveError> {
        if symbols.len() != variances.len() {
            return Err(PrimitiveError::LengthMismatch {
                context: "idiosyncratic variances".to_string(),
                expected: symbols.len(),
                actual: variances.len(),
            });
        }
        Ok(Self { symbols, values: Array2::from_diag(variances) })
    }

    /// Asset labels (rows and columns).
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Variance matrix (n_assets x n_assets).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.symbols.len()
    }

    /// Whether every off-diagonal entry is exactly zero.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        is_diagonal(&self.values)
    }
}

/// Diagonal of an [`IdiosyncraticVarMatrix`], one variance per asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdiosyncraticVarVector {
    symbols: Vec<Symbol>,
    values: Array1<f64>,
}

impl IdiosyncraticVarVector {
    /// Create a labelled variance vector.
    ///
    /// # Errors
    /// Returns `PrimitiveError::LengthMismatch` if `values` and `symbols`
    /// differ in length.
    pub fn new(symbols: Vec<Symbol>, values: Array1<f64>) -> Result<Self, PrimitiveError> {
        if symbols.len() != values.len() {
            return Err(PrimitiveError::LengthMismatch {
                context: "idiosyncratic variance vector".to_string(),
                expected: symbols.len(),
                actual: values.len(),
            });
        }
        Ok(Self { symbols, values })
    }

    /// Asset labels.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Variances in asset order.
    #[must_use]
    pub const fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variance of a specific asset.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.symbols.iter().position(|s| s.as_str() == symbol).map(|i| self.values[i])
    }

    /// Iterate `(symbol, variance)` pairs in asset order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, f64)> {
        self.symbols.iter().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn idio_matrix_diagonal() {
        let m = IdiosyncraticVarMatrix::from_variances(
            vec!["A".into(), "B".into()],
            &array![0.04, 0.09],
        )
        .unwrap();

        assert!(m.is_diagonal());
        assert_eq!(m.values().dim(), (2, 2));
        assert_eq!(m.values()[[1, 1]], 0.09);
        assert_eq!(m.values()[[1, 0]], 0.0);
    }

    #[test]
    fn non_diagonal_detected() {
        assert!(!is_diagonal(&array![[1.0, 0.1], [0.0, 1.0]]));
        assert!(is_diagonal(&array![[1.0, 0.0], [0.0, 0.0]]));
    }

    #[test]
    fn idio_vector_get() {
        let v = IdiosyncraticVarVector::new(vec!["A".into(), "B".into()], array![0.04, 0.09])
            .unwrap();
        assert_eq!(v.get("B"), Some(0.09));
        assert_eq!(v.get("C"), None);
        assert_eq!(v.iter().count(), 2);
    }

    #[test]
    fn idio_vector_length_checked() {
        assert!(IdiosyncraticVarVector::new(vec!["A".into()], array![0.04, 0.09]).is_err());
    }
}
