//! Factor decomposition trait definitions.

use ndarray::{Array2, ArrayView2};

/// Errors that can occur while fitting or applying a decomposition.
#[derive(Debug, thiserror::Error)]
pub enum DecompositionError {
    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Insufficient data for fitting.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Non-finite input or a failed numerical routine.
    #[error("numerical error: {0}")]
    Numerical(String),
}

impl DecompositionError {
    /// Returns whether the error stems from the shape of the input.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

/// A fitted factor decomposition of a T x N returns matrix.
pub trait FactorDecomposition: Send + Sync {
    /// Number of retained components (K).
    fn n_components(&self) -> usize;

    /// Number of features (N) seen during fitting.
    fn n_features(&self) -> usize;

    /// Loadings in asset-major layout (N x K).
    fn loadings(&self) -> Array2<f64>;

    /// Project observations onto the components.
    ///
    /// # Arguments
    /// * `data` - Observations (T x N)
    ///
    /// # Returns
    /// Component scores (T x K).
    ///
    /// # Errors
    /// Returns `DecompositionError::DimensionMismatch` if `data` does not have
    /// `n_features` columns.
    fn transform(&self, data: &ArrayView2<'_, f64>) -> Result<Array2<f64>, DecompositionError>;
}

/// Fits a [`FactorDecomposition`] from a returns matrix.
pub trait DecompositionFitter: Send + Sync {
    /// Configuration type for this fitter.
    type Config: Default + Clone + Send + Sync;

    /// Fitted model produced by this fitter.
    type Model: FactorDecomposition;

    /// Create a new fitter with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Fit the decomposition.
    ///
    /// # Arguments
    /// * `data` - Returns matrix (T x N), one row per period
    ///
    /// # Errors
    /// Returns `DecompositionError` if the configuration does not fit the
    /// data or the numerical routine fails.
    fn fit(&self, data: &ArrayView2<'_, f64>) -> Result<Self::Model, DecompositionError>;
}
