//! Factor return extraction.

use ndarray::{ArrayBase, Data, Dimension};
use statrisk_primitives::{Date, FactorName, FactorReturns, ReturnsMatrix, flat_labels};
use statrisk_traits::FactorDecomposition;
use tracing::debug;

use crate::ModelError;

/// Project a returns matrix into factor space.
///
/// # Arguments
/// * `model` - Fitted decomposition
/// * `returns` - Returns over the same N assets the model was fit on
/// * `dates` - Time labels, 1-dimensional with T entries
/// * `factors` - Factor labels, 1-dimensional with K entries
///
/// # Returns
/// `FactorReturns` of shape T x K, time-major.
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if a label array is not flat, its
/// length disagrees with the returns or model, or the returns have the wrong
/// number of assets.
pub fn factor_returns<M, ST, DT, SF, DF>(
    model: &M,
    returns: &ReturnsMatrix,
    dates: &ArrayBase<ST, DT>,
    factors: &ArrayBase<SF, DF>,
) -> Result<FactorReturns, ModelError>
where
    M: FactorDecomposition + ?Sized,
    ST: Data<Elem = Date>,
    DT: Dimension,
    SF: Data<Elem = FactorName>,
    DF: Dimension,
{
    let dates = flat_labels(dates, returns.n_periods(), "time labels")?;
    let factors = flat_labels(factors, model.n_components(), "factor labels")?;

    let projected = model.transform(&returns.values().view())?;
    let out = FactorReturns::new(dates, factors, projected)?;
    debug!(n_periods = out.n_periods(), n_factors = out.n_factors(), "extracted factor returns");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ndarray::{Array1, Array2, array};
    use statrisk_primitives::Symbol;
    use statrisk_traits::DecompositionFitter;

    use super::*;
    use crate::{PcaFitter, SvdSolver};

    fn dates(n: usize) -> Vec<Date> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n as u64).map(|i| start + chrono::Days::new(i)).collect()
    }

    fn returns() -> ReturnsMatrix {
        let values = array![[0.01, 0.02, 0.00], [0.02, 0.01, 0.01], [-0.01, 0.0, 0.02], [0.0, -0.01, 0.0]];
        let symbols = vec![Symbol::new("AAA"), Symbol::new("BBB"), Symbol::new("CCC")];
        ReturnsMatrix::new(dates(4), symbols, values).unwrap()
    }

    #[test]
    fn shape_is_time_by_factor() {
        let returns = returns();
        let model = PcaFitter::new(2, SvdSolver::Full).fit(&returns.values().view()).unwrap();
        let out = factor_returns(
            &model,
            &returns,
            &Array1::from(dates(4)),
            &Array1::from(FactorName::principals(2)),
        )
        .unwrap();
        assert_eq!(out.shape(), (4, 2));
        assert_eq!(out.dates(), returns.dates());
    }

    #[test]
    fn repeated_extraction_is_bit_identical() {
        let returns = returns();
        let model = PcaFitter::new(2, SvdSolver::Full).fit(&returns.values().view()).unwrap();
        let labels = Array1::from(FactorName::principals(2));
        let first = factor_returns(&model, &returns, &Array1::from(dates(4)), &labels).unwrap();
        let second = factor_returns(&model, &returns, &Array1::from(dates(4)), &labels).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_two_dimensional_time_labels() {
        let returns = returns();
        let model = PcaFitter::new(1, SvdSolver::Full).fit(&returns.values().view()).unwrap();
        let labels = Array2::from_shape_vec((2, 2), dates(4)).unwrap();
        let err =
            factor_returns(&model, &returns, &labels, &Array1::from(FactorName::principals(1)))
                .unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn rejects_returns_of_other_width() {
        let returns = returns();
        let model = PcaFitter::new(1, SvdSolver::Full).fit(&returns.values().view()).unwrap();
        let narrow = ReturnsMatrix::new(
            dates(2),
            vec![Symbol::new("AAA"), Symbol::new("BBB")],
            array![[0.01, 0.02], [0.0, 0.01]],
        )
        .unwrap();
        let err = factor_returns(
            &model,
            &narrow,
            &Array1::from(dates(2)),
            &Array1::from(FactorName::principals(1)),
        )
        .unwrap_err();
        assert!(err.is_shape_mismatch());
    }
}
