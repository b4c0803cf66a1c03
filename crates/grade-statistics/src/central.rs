//! Median and mode

use grade_core::{Error, Result};
use grade_quantile::quantile_sorted;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Median of pre-sorted data
///
/// Defined as the 0.5 quantile of the shared estimator so it is bit-identical
/// to `q2` and `p50`.
pub fn median_sorted(sorted_data: &[f64]) -> Result<f64> {
    quantile_sorted(sorted_data, 0.5)
}

/// Every value sharing the highest frequency, ascending
///
/// A sample with all-distinct values returns every value.
pub fn modes(data: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::empty_sample("mode"));
    }

    let mut counts: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for &value in data {
        *counts.entry(OrderedFloat(value)).or_insert(0) += 1;
    }

    let highest = counts.values().copied().max().unwrap_or(0);
    Ok(counts
        .into_iter()
        .filter(|&(_, count)| count == highest)
        .map(|(value, _)| value.into_inner())
        .collect())
}
