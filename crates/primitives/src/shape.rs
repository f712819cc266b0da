//! Shape validation at component boundaries.
//!
//! Label sequences and matrices arrive from callers as arbitrary-dimensional
//! `ndarray` values. These helpers narrow them to the dimensionality a
//! component requires, or fail with a [`PrimitiveError`] naming the input.

use ndarray::{ArrayBase, ArrayView2, Data, Dimension, Ix1, Ix2};

use crate::PrimitiveError;

/// Validate a label array as flat with exactly `expected_len` entries.
///
/// # Arguments
/// * `labels` - Label array of any dimensionality
/// * `expected_len` - Length of the matrix axis the labels describe
/// * `context` - Name used in the error message
///
/// # Returns
/// The labels as an owned vector, in array order.
///
/// # Errors
/// Returns `PrimitiveError::Dimensionality` if `labels` is not 1-dimensional
/// and `PrimitiveError::LengthMismatch` if its length differs from `expected_len`.
pub fn flat_labels<S, D>(
    labels: &ArrayBase<S, D>,
    expected_len: usize,
    context: &str,
) -> Result<Vec<S::Elem>, PrimitiveError>
where
    S: Data,
    S::Elem: Clone,
    D: Dimension,
{
    let flat = labels.view().into_dimensionality::<Ix1>().map_err(|_| {
        PrimitiveError::Dimensionality {
            context: context.to_string(),
            expected: 1,
            actual: labels.ndim(),
        }
    })?;

    if flat.len() != expected_len {
        return Err(PrimitiveError::LengthMismatch {
            context: context.to_string(),
            expected: expected_len,
            actual: flat.len(),
        });
    }

    Ok(flat.to_vec())
}

/// Validate a numeric array as a 2-dimensional `rows x cols` matrix.
///
/// # Errors
/// Returns `PrimitiveError::Dimensionality` if `matrix` is not 2-dimensional
/// and `PrimitiveError::LengthMismatch` if either axis has the wrong length.
pub fn matrix_view<'a, S, D>(
    matrix: &'a ArrayBase<S, D>,
    rows: usize,
    cols: usize,
    context: &str,
) -> Result<ArrayView2<'a, f64>, PrimitiveError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let view = matrix.view().into_dimensionality::<Ix2>().map_err(|_| {
        PrimitiveError::Dimensionality {
            context: context.to_string(),
            expected: 2,
            actual: matrix.ndim(),
        }
    })?;

    if view.nrows() != rows {
        return Err(PrimitiveError::LengthMismatch {
            context: format!("{context} rows"),
            expected: rows,
            actual: view.nrows(),
        });
    }
    if view.ncols() != cols {
        return Err(PrimitiveError::LengthMismatch {
            context: format!("{context} columns"),
            expected: cols,
            actual: view.ncols(),
        });
    }

    Ok(view)
}
