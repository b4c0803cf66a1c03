//! Core traits for quantile estimation

use grade_core::{Error, Result};

/// Main trait for quantile estimation
///
/// Every component that reports quartiles or percentiles goes through one
/// implementation of this trait, so the median, `q2` and `p50` of a sample
/// always agree.
pub trait QuantileEstimator {
    /// Short method name for reports
    fn name(&self) -> &'static str;

    /// Estimate a single quantile from pre-sorted data
    ///
    /// # Arguments
    /// * `sorted_data` - The data sample, already sorted ascending
    /// * `p` - The probability (0.0 to 1.0)
    fn quantile_sorted(&self, sorted_data: &[f64], p: f64) -> Result<f64>;

    /// Estimate a single quantile
    ///
    /// # Warning
    /// This method will sort the data in place! If you need to preserve the original
    /// order, use `quantile_sorted()` with pre-sorted data or make a copy first.
    fn quantile(&self, data: &mut [f64], p: f64) -> Result<f64> {
        data.sort_by(f64::total_cmp);
        self.quantile_sorted(data, p)
    }

    /// Estimate multiple quantiles from pre-sorted data
    fn quantiles_sorted(&self, sorted_data: &[f64], ps: &[f64]) -> Result<Vec<f64>> {
        ps.iter()
            .map(|&p| self.quantile_sorted(sorted_data, p))
            .collect()
    }

    /// Estimate multiple quantiles
    ///
    /// # Warning
    /// Sorts `data` in place.
    fn quantiles(&self, data: &mut [f64], ps: &[f64]) -> Result<Vec<f64>> {
        data.sort_by(f64::total_cmp);
        self.quantiles_sorted(data, ps)
    }
}

/// Reject empty samples and probabilities outside [0, 1]
pub(crate) fn check_inputs(sorted_data: &[f64], p: f64) -> Result<()> {
    if sorted_data.is_empty() {
        return Err(Error::empty_sample("quantile"));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_probability(p));
    }
    Ok(())
}
