//! Weight type definitions.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Portfolio holdings, one weight per asset in factor-betas row order.
///
/// Weights are not required to sum to one; leveraged and long-short books
/// are represented as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioWeights {
    weights: Array1<f64>,
}

impl PortfolioWeights {
    /// Create portfolio weights.
    #[must_use]
    pub const fn new(weights: Array1<f64>) -> Self {
        Self { weights }
    }

    /// Equal weights summing to one across `n` assets.
    #[must_use]
    pub fn equal(n: usize) -> Self {
        if n == 0 {
            return Self::new(Array1::zeros(0));
        }
        Self::new(Array1::from_elem(n, 1.0 / n as f64))
    }

    /// Get the weights as an ndarray.
    #[must_use]
    pub const fn as_array(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl From<Vec<f64>> for PortfolioWeights {
    fn from(weights: Vec<f64>) -> Self {
        Self::new(Array1::from_vec(weights))
    }
}

impl From<Array1<f64>> for PortfolioWeights {
    fn from(weights: Array1<f64>) -> Self {
        Self::new(weights)
    }
}
