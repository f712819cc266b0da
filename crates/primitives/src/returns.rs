//! Return type definitions.

use std::collections::HashSet;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{Date, PrimitiveError, Symbol};

/// Asset returns over time: one row per period, one column per asset (T x N).
///
/// Dates are strictly increasing and symbols are unique. Values are not
/// checked for finiteness here; the fitter rejects non-finite input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsMatrix {
    dates: Vec<Date>,
    symbols: Vec<Symbol>,
    values: Array2<f64>,
}

impl ReturnsMatrix {
    /// Create a returns matrix.
    ///
    /// # Errors
    /// Returns `PrimitiveError` if the labels disagree with the shape of
    /// `values`, dates are not strictly increasing, or a symbol repeats.
    pub fn new(
        dates: Vec<Date>,
        symbols: Vec<Symbol>,
        values: Array2<f64>,
    ) -> Result<Self, PrimitiveError> {
        if dates.len() != values.nrows() {
            return Err(PrimitiveError::LengthMismatch {
                context: "returns time index".to_string(),
                expected: values.nrows(),
                actual: dates.len(),
            });
        }
        if symbols.len() != values.ncols() {
            return Err(PrimitiveError::LengthMismatch {
                context: "returns asset labels".to_string(),
                expected: values.ncols(),
                actual: symbols.len(),
            });
        }
        if let Some(position) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(PrimitiveError::UnorderedIndex { position: position + 1 });
        }
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol) {
                return Err(PrimitiveError::DuplicateLabel(symbol.to_string()));
            }
        }

        Ok(Self { dates, symbols, values })
    }

    /// Time labels (rows).
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Asset labels (columns).
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Return matrix (n_periods x n_assets).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of periods.
    #[must_use]
    pub fn n_periods(&self) -> usize {
        self.values.nrows()
    }

    /// Number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.values.ncols()
    }

    /// `(n_periods, n_assets)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return series of a specific asset.
    #[must_use]
    pub fn column(&self, symbol: &str) -> Option<ArrayView1<'_, f64>> {
        self.symbols.iter().position(|s| s.as_str() == symbol).map(|j| self.values.column(j))
    }
}
