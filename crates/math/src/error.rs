//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Too few observations for the requested statistic.
    #[error("insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Minimum number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Iterative solver did not converge.
    #[error("eigensolver did not converge after {sweeps} sweeps")]
    NonConvergence {
        /// Sweeps performed.
        sweeps: usize,
    },

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Numerical instability (NaN or Inf).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::NonConvergence { sweeps: 50 };
        assert!(err.to_string().contains("50"));

        let err = MathError::DimensionMismatch { expected: 10, actual: 5 };
        assert!(err.to_string().contains("10") && err.to_string().contains("5"));

        let err = MathError::InsufficientObservations { required: 2, actual: 1 };
        assert_eq!(err.to_string(), "insufficient observations: need at least 2, got 1");
    }
}
