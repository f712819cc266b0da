//! Factor exposure (beta) extraction.

use ndarray::{ArrayBase, Data, Dimension};
use statrisk_primitives::{FactorBetas, FactorName, Symbol, flat_labels};
use statrisk_traits::FactorDecomposition;
use tracing::debug;

use crate::ModelError;

/// Label the fitted loadings as a betas table, one row per asset.
///
/// # Arguments
/// * `model` - Fitted decomposition
/// * `symbols` - Asset labels, 1-dimensional with N entries
/// * `factors` - Factor labels, 1-dimensional with K entries
///
/// # Returns
/// `FactorBetas` of shape N x K holding the transposed components.
///
/// # Errors
/// Returns `ModelError::ShapeMismatch` if either label array is not flat or
/// its length disagrees with the model.
pub fn factor_betas<M, SA, DA, SF, DF>(
    model: &M,
    symbols: &ArrayBase<SA, DA>,
    factors: &ArrayBase<SF, DF>,
) -> Result<FactorBetas, ModelError>
where
    M: FactorDecomposition + ?Sized,
    SA: Data<Elem = Symbol>,
    DA: Dimension,
    SF: Data<Elem = FactorName>,
    DF: Dimension,
{
    let symbols = flat_labels(symbols, model.n_features(), "asset labels")?;
    let factors = flat_labels(factors, model.n_components(), "factor labels")?;

    let betas = FactorBetas::new(symbols, factors, model.loadings())?;
    debug!(n_assets = betas.n_assets(), n_factors = betas.n_factors(), "extracted factor betas");
    Ok(betas)
}
