//! Quartiles and the interquartile range

use grade_core::Result;
use grade_quantile::quantile_sorted;
use serde::{Deserialize, Serialize};

/// Tukey's fence multiplier for outlier detection
pub const TUKEY_FENCE: f64 = 1.5;

/// Q1, Q2, Q3 and Q3 - Q1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl Quartiles {
    /// Compute from pre-sorted data
    pub fn from_sorted(sorted_data: &[f64]) -> Result<Self> {
        let q1 = quantile_sorted(sorted_data, 0.25)?;
        let q2 = quantile_sorted(sorted_data, 0.5)?;
        let q3 = quantile_sorted(sorted_data, 0.75)?;
        Ok(Self {
            q1,
            q2,
            q3,
            iqr: q3 - q1,
        })
    }

    /// `(q1 - k * iqr, q3 + k * iqr)`
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let reach = multiplier * self.iqr;
        (self.q1 - reach, self.q3 + reach)
    }

    /// `(lower, upper)` Tukey fences at 1.5 IQR
    pub fn tukey_fences(&self) -> (f64, f64) {
        self.fences(TUKEY_FENCE)
    }
}
