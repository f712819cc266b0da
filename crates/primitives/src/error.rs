//! Error types for labelled value construction.

/// Errors that can occur when building or validating labelled tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveError {
    /// Input has the wrong number of axes.
    #[error("{context} must be {expected}-dimensional, got {actual} dimensions")]
    Dimensionality {
        /// What was being validated.
        context: String,
        /// Required number of axes.
        expected: usize,
        /// Actual number of axes.
        actual: usize,
    },

    /// Label count or axis length disagrees with the matrix.
    #[error("length mismatch for {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// What was being validated.
        context: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Time index is not strictly increasing.
    #[error("time index not strictly increasing at position {position}")]
    UnorderedIndex {
        /// First offending row.
        position: usize,
    },

    /// The same label appears twice on one axis.
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),
}

impl PrimitiveError {
    /// Returns whether this error describes a shape violation.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::Dimensionality { .. } | Self::LengthMismatch { .. })
    }
}
