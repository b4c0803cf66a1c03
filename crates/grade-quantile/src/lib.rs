//! Quantile estimation for grade samples
//!
//! Quartiles, the percentile table, the median and box-plot fences are all
//! computed with the single estimator exported here, [`LinearInterpolation`].
//!
//! # Example
//!
//! ```rust
//! use grade_quantile::{LinearInterpolation, QuantileEstimator};
//!
//! let sorted = vec![60.0, 70.0, 70.0, 80.0, 90.0];
//! let q1 = LinearInterpolation.quantile_sorted(&sorted, 0.25).unwrap();
//! assert_eq!(q1, 70.0);
//! ```

pub mod linear;
pub mod traits;

pub use linear::LinearInterpolation;
pub use traits::QuantileEstimator;

pub use grade_core::{Error, Result};

/// Probabilities reported in the percentile table: p10, p25, p50, p75, p90, p95
pub const PERCENTILE_TABLE: [f64; 6] = [0.10, 0.25, 0.50, 0.75, 0.90, 0.95];

/// The estimator used throughout the workspace
pub const DEFAULT_ESTIMATOR: LinearInterpolation = LinearInterpolation::new();

/// Quantile of pre-sorted data with the workspace estimator
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Result<f64> {
    DEFAULT_ESTIMATOR.quantile_sorted(sorted_data, p)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{quantile_sorted, LinearInterpolation, QuantileEstimator, PERCENTILE_TABLE};
}
