//! Error types for risk model construction.

use statrisk_math::MathError;
use statrisk_primitives::PrimitiveError;
use statrisk_traits::DecompositionError;

/// Errors that can occur while building or applying the risk model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Factor count incompatible with the returns matrix, or a fit that
    /// failed on degenerate input.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Label sequence not 1-dimensional, or an axis length disagreement.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Too few time observations for a variance estimate.
    #[error("insufficient samples: need at least {required} observations, got {actual}")]
    InsufficientSamples {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Negative or non-finite quadratic form before a square root.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Labels that are well-shaped but otherwise invalid.
    #[error("invalid labels: {0}")]
    Labels(PrimitiveError),
}

impl ModelError {
    /// Returns whether this error stems from the shape of an input.
    #[must_use]
    pub const fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch(_))
    }
}

impl From<PrimitiveError> for ModelError {
    fn from(err: PrimitiveError) -> Self {
        if err.is_shape_error() { Self::ShapeMismatch(err.to_string()) } else { Self::Labels(err) }
    }
}

impl From<DecompositionError> for ModelError {
    fn from(err: DecompositionError) -> Self {
        match err {
            DecompositionError::DimensionMismatch { .. } => Self::ShapeMismatch(err.to_string()),
            DecompositionError::InsufficientData { required, actual } => {
                Self::InsufficientSamples { required, actual }
            }
            DecompositionError::InvalidConfig(_) | DecompositionError::Numerical(_) => {
                Self::InvalidDimension(err.to_string())
            }
        }
    }
}

impl From<MathError> for ModelError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientObservations { required, actual } => {
                Self::InsufficientSamples { required, actual }
            }
            MathError::DimensionMismatch { .. } => Self::ShapeMismatch(err.to_string()),
            MathError::NumericalInstability(msg) => Self::NumericalInstability(msg),
            MathError::NonConvergence { .. }
            | MathError::InvalidParameter(_)
            | MathError::EmptyData => Self::InvalidDimension(err.to_string()),
        }
    }
}
