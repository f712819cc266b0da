//! Equal-frequency quantile bucketing.

use crate::UtilsError;

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    match sorted.get(lo + 1) {
        Some(&next) if frac > 0.0 => sorted[lo] + frac * (next - sorted[lo]),
        _ => sorted[lo],
    }
}

/// Assign each value the index of its quantile bucket, `0..q`.
///
/// Edges are the `0, 1/q, ..., 1` quantiles of the finite values (linear
/// interpolation). Buckets are right-closed, with the lowest edge included
/// in bucket 0. Non-finite values get `None`.
///
/// # Arguments
/// * `values` - Values to bucket, e.g. a cross-section of factor scores
/// * `q` - Number of buckets
///
/// # Errors
/// Returns `UtilsError::InvalidParameter` if `q` is zero and
/// `UtilsError::DuplicateBinEdges` if the data is too concentrated to give
/// `q` distinct edges.
pub fn bucket_quantiles(values: &[f64], q: usize) -> Result<Vec<Option<usize>>, UtilsError> {
    if q == 0 {
        return Err(UtilsError::InvalidParameter("number of quantiles must be positive".to_string()));
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Ok(vec![None; values.len()]);
    }
    sorted.sort_by(f64::total_cmp);

    let edges: Vec<f64> = (0..=q).map(|i| quantile(&sorted, i as f64 / q as f64)).collect();
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(UtilsError::DuplicateBinEdges(edges));
    }

    Ok(values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return None;
            }
            // First upper edge at or above v; the lowest value lands in bucket 0.
            let upper = edges[1..].partition_point(|&e| e < v);
            Some(upper.min(q - 1))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn quartiles_of_one_to_ten() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let buckets = bucket_quantiles(&values, 4).unwrap();
        let expected = [0, 0, 0, 1, 1, 2, 2, 3, 3, 3];
        assert_eq!(buckets, expected.iter().map(|&b| Some(b)).collect::<Vec<_>>());
    }

    #[test]
    fn order_of_input_is_preserved() {
        let buckets = bucket_quantiles(&[5.0, 1.0, 3.0, 2.0, 4.0], 5).unwrap();
        assert_eq!(buckets, vec![Some(4), Some(0), Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn right_closed_edges() {
        // Edges for q = 2 are [0, 1, 4]; 1.0 sits on the middle edge.
        let buckets = bucket_quantiles(&[0.0, 1.0, 4.0], 2).unwrap();
        assert_eq!(buckets, vec![Some(0), Some(0), Some(1)]);
    }

    #[test]
    fn nan_is_unassigned() {
        let buckets = bucket_quantiles(&[1.0, f64::NAN, 2.0, 3.0], 3).unwrap();
        assert_eq!(buckets[1], None);
        assert_eq!(buckets[0], Some(0));
        assert_eq!(buckets[3], Some(2));
    }

    #[test]
    fn all_missing() {
        assert_eq!(bucket_quantiles(&[f64::NAN, f64::NAN], 2).unwrap(), vec![None, None]);
    }

    #[test]
    fn duplicate_edges_are_rejected() {
        let err = bucket_quantiles(&[1.0, 1.0, 1.0, 1.0, 2.0], 4).unwrap_err();
        assert!(matches!(err, UtilsError::DuplicateBinEdges(_)));
    }

    #[rstest]
    #[case(0)]
    fn zero_quantiles_rejected(#[case] q: usize) {
        assert!(matches!(bucket_quantiles(&[1.0, 2.0], q), Err(UtilsError::InvalidParameter(_))));
    }

    #[test]
    fn single_bucket_holds_everything() {
        let buckets = bucket_quantiles(&[3.0, -1.0, 7.0], 1).unwrap();
        assert_eq!(buckets, vec![Some(0), Some(0), Some(0)]);
    }
}
