//! Linear interpolation between closest ranks
//!
//! This is Hyndman & Fan type 7, the default of R's `quantile()` and of
//! Excel's `PERCENTILE.INC`:
//!
//! ```text
//! h = (n - 1) * p
//! Q(p) = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! For an even-length sample `Q(0.5)` lands halfway between the two central
//! values, so it doubles as the median.

use crate::traits::{check_inputs, QuantileEstimator};
use grade_core::Result;

/// Linear-interpolation quantile estimator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearInterpolation;

impl LinearInterpolation {
    pub const fn new() -> Self {
        Self
    }
}

impl QuantileEstimator for LinearInterpolation {
    fn name(&self) -> &'static str {
        "linear-interpolation"
    }

    fn quantile_sorted(&self, sorted_data: &[f64], p: f64) -> Result<f64> {
        check_inputs(sorted_data, p)?;

        let n = sorted_data.len();
        if n == 1 {
            return Ok(sorted_data[0]);
        }

        let h = (n - 1) as f64 * p;
        let lower = h.floor() as usize;
        if lower >= n - 1 {
            return Ok(sorted_data[n - 1]);
        }

        let fraction = h - lower as f64;
        let low = sorted_data[lower];
        let high = sorted_data[lower + 1];
        Ok(low + fraction * (high - low))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grade_core::Error;

    #[test]
    fn test_exact_ranks() {
        let data = [10.0, 20.0, 30.0, 40.0, 50.0];
        let est = LinearInterpolation;
        assert_eq!(est.quantile_sorted(&data, 0.0).unwrap(), 10.0);
        assert_eq!(est.quantile_sorted(&data, 0.25).unwrap(), 20.0);
        assert_eq!(est.quantile_sorted(&data, 0.5).unwrap(), 30.0);
        assert_eq!(est.quantile_sorted(&data, 1.0).unwrap(), 50.0);
    }

    #[test]
    fn test_interpolated_ranks() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let est = LinearInterpolation;
        // h = 0.75
        assert_relative_eq!(est.quantile_sorted(&data, 0.25).unwrap(), 1.75);
        // h = 1.5
        assert_relative_eq!(est.quantile_sorted(&data, 0.5).unwrap(), 2.5);
        // h = 2.85
        assert_relative_eq!(est.quantile_sorted(&data, 0.95).unwrap(), 3.85);
    }

    #[test]
    fn test_single_value() {
        let est = LinearInterpolation;
        for p in [0.0, 0.1, 0.5, 0.95, 1.0] {
            assert_eq!(est.quantile_sorted(&[75.0], p).unwrap(), 75.0);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let est = LinearInterpolation;
        assert!(matches!(
            est.quantile_sorted(&[], 0.5),
            Err(Error::EmptySample { .. })
        ));
        assert!(matches!(
            est.quantile_sorted(&[1.0], 1.5),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            est.quantile_sorted(&[1.0], -0.1),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unsorted_entry_point_sorts_in_place() {
        let mut data = vec![5.0, 1.0, 3.0];
        let median = LinearInterpolation.quantile(&mut data, 0.5).unwrap();
        assert_eq!(median, 3.0);
        assert_eq!(data, vec![1.0, 3.0, 5.0]);
    }
}
