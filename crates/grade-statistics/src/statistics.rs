//! The full descriptive summary of a grade sample

use crate::central::{median_sorted, modes};
use crate::iqr::Quartiles;
use crate::moments::{mean, population_variance};
use grade_core::{GradeSample, Result};
use grade_quantile::{LinearInterpolation, QuantileEstimator, PERCENTILE_TABLE};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Percentile table reported alongside the quartiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
}

impl Percentiles {
    /// Compute from pre-sorted data
    pub fn from_sorted(sorted_data: &[f64]) -> Result<Self> {
        let table = LinearInterpolation.quantiles_sorted(sorted_data, &PERCENTILE_TABLE)?;
        Ok(Self {
            p10: table[0],
            p25: table[1],
            p50: table[2],
            p75: table[3],
            p90: table[4],
            p95: table[5],
        })
    }
}

/// Descriptive statistics of one grade sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// All values sharing the highest frequency
    pub mode: Vec<f64>,
    pub standard_deviation: f64,
    /// Population variance
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub quartiles: Quartiles,
    pub percentiles: Percentiles,
}

impl GradeStatistics {
    /// Compute from values already sorted ascending
    pub fn from_sorted(sorted_data: &[f64]) -> Result<Self> {
        let mean = mean(sorted_data)?;
        let variance = population_variance(sorted_data)?;
        let min = sorted_data[0];
        let max = sorted_data[sorted_data.len() - 1];

        Ok(Self {
            count: sorted_data.len(),
            mean,
            median: median_sorted(sorted_data)?,
            mode: modes(sorted_data)?,
            standard_deviation: variance.sqrt(),
            variance,
            min,
            max,
            range: max - min,
            quartiles: Quartiles::from_sorted(sorted_data)?,
            percentiles: Percentiles::from_sorted(sorted_data)?,
        })
    }

    /// Coefficient of variation, 0 when the mean is 0
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.standard_deviation / self.mean.abs()
        }
    }
}

impl fmt::Display for GradeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}, mean={:.2}, median={:.2}, sd={:.2}, range=[{:.2}, {:.2}]",
            self.count, self.mean, self.median, self.standard_deviation, self.min, self.max
        )
    }
}

/// Compute [`GradeStatistics`] for a sample
///
/// Fails only with `EmptySample`. A single value yields zero spread.
#[instrument(skip_all, fields(n = sample.len()))]
pub fn compute_statistics(sample: &GradeSample) -> Result<GradeStatistics> {
    sample.require_non_empty("grade statistics")?;
    let stats = GradeStatistics::from_sorted(&sample.sorted_values())?;
    debug!(%stats, "computed grade statistics");
    Ok(stats)
}

/// Compute [`GradeStatistics`] for raw values
pub fn describe(values: &[f64]) -> Result<GradeStatistics> {
    compute_statistics(&GradeSample::from_values(values))
}
