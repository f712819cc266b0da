//! Long-format frames to dense return matrices.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use ndarray::Array2;
use polars::prelude::*;
use statrisk_primitives::{Date, ReturnsMatrix, Symbol};
use tracing::debug;

use crate::UtilsError;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn epoch_days_to_date(days: i32) -> Result<Date, UtilsError> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| UtilsError::InvalidParameter(format!("date out of range: {days}")))
}

fn require(df: &DataFrame, name: &str) -> Result<Column, UtilsError> {
    df.column(name).cloned().map_err(|_| UtilsError::MissingColumn(name.to_string()))
}

/// Pivot a long `date | symbol | value` frame into a [`ReturnsMatrix`].
///
/// Dates ascend down the rows and symbols are sorted across the columns.
/// Every date and symbol pair must appear exactly once.
///
/// # Arguments
/// * `df` - Frame with a `date` (Date) column, a `symbol` (String) column and `value_col`
/// * `value_col` - Numeric column holding the returns
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a column is absent,
/// `UtilsError::MissingObservation` for a gap or null value, and
/// `UtilsError::DuplicateObservation` for a repeated pair.
pub fn returns_matrix_from_frame(
    df: &DataFrame,
    value_col: &str,
) -> Result<ReturnsMatrix, UtilsError> {
    let dates = require(df, "date")?.cast(&DataType::Int32)?;
    let symbols = require(df, "symbol")?;
    let values = require(df, value_col)?.cast(&DataType::Float64)?;

    let dates = dates.i32()?;
    let symbols = symbols.str()?;
    let values = values.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for ((date, symbol), value) in dates.into_iter().zip(symbols).zip(values) {
        let (Some(date), Some(symbol)) = (date, symbol) else {
            return Err(UtilsError::InvalidParameter("null date or symbol".to_string()));
        };
        rows.push((epoch_days_to_date(date)?, symbol, value));
    }

    let date_index: Vec<Date> =
        rows.iter().map(|(d, _, _)| *d).collect::<BTreeSet<_>>().into_iter().collect();
    let symbol_index: Vec<&str> =
        rows.iter().map(|(_, s, _)| *s).collect::<BTreeSet<_>>().into_iter().collect();

    let date_pos: HashMap<Date, usize> =
        date_index.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let symbol_pos: HashMap<&str, usize> =
        symbol_index.iter().enumerate().map(|(j, s)| (*s, j)).collect();

    let mut matrix = Array2::<f64>::zeros((date_index.len(), symbol_index.len()));
    let mut filled = Array2::<bool>::from_elem(matrix.dim(), false);

    for (date, symbol, value) in &rows {
        let cell = (date_pos[date], symbol_pos[symbol]);
        if filled[cell] {
            return Err(UtilsError::DuplicateObservation {
                date: date.to_string(),
                symbol: (*symbol).to_string(),
            });
        }
        let Some(value) = value else {
            return Err(UtilsError::MissingObservation {
                date: date.to_string(),
                symbol: (*symbol).to_string(),
            });
        };
        matrix[cell] = *value;
        filled[cell] = true;
    }

    if let Some(((i, j), _)) = filled.indexed_iter().find(|(_, f)| !**f) {
        return Err(UtilsError::MissingObservation {
            date: date_index[i].to_string(),
            symbol: symbol_index[j].to_string(),
        });
    }

    debug!(n_periods = date_index.len(), n_assets = symbol_index.len(), "pivoted returns frame");

    let symbols = symbol_index.into_iter().map(Symbol::from).collect();
    Ok(ReturnsMatrix::new(date_index, symbols, matrix)?)
}
