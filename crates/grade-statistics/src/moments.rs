//! Mean and population variance
//!
//! A cohort is the full population of enrolled students, so variance divides
//! by N rather than N - 1.

use grade_core::{Error, Result};

/// Arithmetic mean
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::empty_sample("mean"));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population variance (divides by N)
///
/// Returns exactly 0 when every value is identical, so rounding in the mean
/// never leaks a tiny positive spread into reports.
pub fn population_variance(data: &[f64]) -> Result<f64> {
    let mean = mean(data)?;
    let first = data[0];
    if data.iter().all(|&x| x == first) {
        return Ok(0.0);
    }

    let sum_sq: f64 = data
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum();
    Ok(sum_sq / data.len() as f64)
}

/// Population standard deviation
pub fn population_std_dev(data: &[f64]) -> Result<f64> {
    population_variance(data).map(f64::sqrt)
}
